use business::domain::product::validation::{FieldError, ProductField};
use business::domain::product::value_objects::Shop;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    TextInput { placeholder: &'static str },
    /// Checked means the product needs to be bought.
    StatusCheckbox,
    /// One toggle per shop of the closed list.
    ShopToggles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: ProductField,
    pub label: &'static str,
    pub control: ControlKind,
    pub rule: ValidationRule,
}

/// Fields of the product form, in render order.
pub const PRODUCT_FORM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        field: ProductField::ProductName,
        label: "Product",
        control: ControlKind::TextInput {
            placeholder: "Product...",
        },
        rule: ValidationRule::Required,
    },
    FieldDescriptor {
        field: ProductField::Status,
        label: "Buy this product",
        control: ControlKind::StatusCheckbox,
        rule: ValidationRule::Required,
    },
    FieldDescriptor {
        field: ProductField::Shops,
        label: "Shops",
        control: ControlKind::ShopToggles,
        rule: ValidationRule::Optional,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopToggle {
    pub shop: Shop,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedControl {
    TextInput {
        value: String,
        placeholder: &'static str,
    },
    Checkbox {
        checked: bool,
    },
    Toggles(Vec<ShopToggle>),
}

/// A field ready to be drawn, with its current value and inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub field: ProductField,
    pub label: &'static str,
    pub required: bool,
    pub control: RenderedControl,
    pub error: Option<FieldError>,
}
