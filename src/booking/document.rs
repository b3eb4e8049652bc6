/// How a control is looked up: by its `name` attribute or by its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Name(String),
    Id(String),
}

impl Selector {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }
}

/// A single form control as the page exposes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Control {
    pub name: Option<String>,
    pub id: Option<String>,
    pub value: String,
    /// `Some` for checkboxes and radios.
    pub checked: Option<bool>,
    pub disabled: bool,
    /// Whether the control sits inside the booking form rather than elsewhere on the page.
    pub in_form: bool,
}

impl Control {
    /// A form control whose `name` and `id` are the same, the common case on the booking page.
    pub fn input(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.to_string()),
            id: Some(name.to_string()),
            value: value.into(),
            in_form: true,
            ..Self::default()
        }
    }

    pub fn named(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.to_string()),
            value: value.into(),
            in_form: true,
            ..Self::default()
        }
    }

    pub fn with_id(id: &str, value: impl Into<String>) -> Self {
        Self {
            id: Some(id.to_string()),
            value: value.into(),
            in_form: true,
            ..Self::default()
        }
    }

    /// Radio or checkbox.
    pub fn choice(name: &str, value: impl Into<String>, checked: bool) -> Self {
        Self {
            checked: Some(checked),
            ..Self::named(name, value)
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn outside_form(mut self) -> Self {
        self.in_form = false;
        self
    }

    fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    fn is_checked(&self) -> bool {
        self.checked == Some(true)
    }
}

/// The page the handler attaches to: an optional booking form plus every
/// control on the page, in document order.
#[derive(Debug, Clone, Default)]
pub struct FormDocument {
    form_id: Option<String>,
    controls: Vec<Control>,
}

impl FormDocument {
    pub fn with_form(form_id: impl Into<String>) -> Self {
        Self {
            form_id: Some(form_id.into()),
            controls: Vec::new(),
        }
    }

    /// A page that has no booking form at all.
    pub fn without_form() -> Self {
        Self::default()
    }

    pub fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    pub fn has_form(&self, form_id: &str) -> bool {
        self.form_id.as_deref() == Some(form_id)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn by_id(&self, id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.has_id(id))
    }

    pub fn by_id_mut(&mut self, id: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|c| c.has_id(id))
    }

    /// First checked control with this name, preferring the form over the rest of the page.
    pub fn checked_named(&self, name: &str) -> Option<&Control> {
        self.find_preferring_form(|c| c.has_name(name) && c.is_checked())
    }

    /// First control with this name, preferring the form over the rest of the page.
    pub fn first_named(&self, name: &str) -> Option<&Control> {
        self.find_preferring_form(|c| c.has_name(name))
    }

    /// Name lookups favour a checked control; id lookups take the match as is.
    pub fn select(&self, selector: &Selector) -> Option<&Control> {
        match selector {
            Selector::Name(name) => self.checked_named(name).or_else(|| self.first_named(name)),
            Selector::Id(id) => self.by_id(id),
        }
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.by_id_mut(id) {
            Some(control) => {
                control.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Clears `disabled` on every control and returns how many were unlocked.
    pub fn enable_all(&mut self) -> usize {
        let mut unlocked = 0;
        for control in self.controls.iter_mut().filter(|c| c.disabled) {
            control.disabled = false;
            unlocked += 1;
        }
        unlocked
    }

    fn find_preferring_form(&self, pred: impl Fn(&Control) -> bool) -> Option<&Control> {
        self.controls
            .iter()
            .find(|c| c.in_form && pred(*c))
            .or_else(|| self.controls.iter().find(|c| pred(*c)))
    }
}
