use std::collections::HashMap;

/// Breadcrumb key for the identifier the primary endpoint returned.
pub const IMPRESSION_KEY: &str = "lastImpressionId";
/// Breadcrumb key for the identifier the secondary store assigned.
pub const PROXY_ORDER_KEY: &str = "lastProxyOrderId";

/// Loading-indicator callbacks around the network phase of a submission.
pub trait SubmitHooks {
    fn on_submit_start(&mut self) {}

    fn on_submit_end(&mut self, _success: bool) {}
}

/// Page-level effects the handler needs from its host.
pub trait PageHost {
    fn alert(&mut self, message: &str);

    fn focus(&mut self, control_id: &str);

    fn navigate(&mut self, url: &str);
}

/// Local key/value storage for diagnostic breadcrumbs.
pub trait BreadcrumbStore {
    fn set_item(&mut self, key: &str, value: &str);

    fn get_item(&self, key: &str) -> Option<String>;
}

pub trait Page: PageHost + SubmitHooks + BreadcrumbStore {}

impl<T: PageHost + SubmitHooks + BreadcrumbStore> Page for T {}

#[derive(Debug, Clone, Default)]
pub struct MemoryBreadcrumbs {
    items: HashMap<String, String>,
}

impl BreadcrumbStore for MemoryBreadcrumbs {
    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}
