use std::collections::BTreeSet;

use strum::IntoEnumIterator;

use business::domain::product::model::{NewProductProps, Product};
use business::domain::product::validation::ValidationErrors;
use business::domain::product::value_objects::{ProductId, ProductStatus, Shop};

use super::descriptor::{
    ControlKind, PRODUCT_FORM_FIELDS, RenderedControl, RenderedField, ShopToggle, ValidationRule,
};
use super::errors::FormError;

pub type SubmitCallback = Box<dyn FnMut(Product) + Send>;
pub type CancelCallback = Box<dyn FnMut() + Send>;
pub type DeleteCallback = Box<dyn FnMut(Product) + Send>;

pub struct ProductFormCallbacks {
    pub submit: SubmitCallback,
    pub cancel: CancelCallback,
    /// Only given when editing a product that can be deleted.
    pub delete: Option<DeleteCallback>,
}

/// Editable view of a new or existing product.
///
/// Each form ends with exactly one of submit, cancel or delete; after that it
/// is closed and refuses further actions. A rejected submit keeps it open.
pub struct ProductForm {
    id: Option<ProductId>,
    product_name: String,
    status: ProductStatus,
    shops: BTreeSet<Shop>,
    errors: ValidationErrors,
    callbacks: ProductFormCallbacks,
    open: bool,
}

impl ProductForm {
    /// New products start with an empty name, `ToBuy` and no shops.
    pub fn new(defaults: Option<Product>, callbacks: ProductFormCallbacks) -> Self {
        let (id, product_name, status, shops) = match defaults {
            Some(product) => (
                product.id,
                product.product_name,
                product.status,
                product.shops,
            ),
            None => (None, String::new(), ProductStatus::ToBuy, BTreeSet::new()),
        };

        Self {
            id,
            product_name,
            status,
            shops,
            errors: ValidationErrors::new(),
            callbacks,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.callbacks.delete.is_some()
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn set_product_name(&mut self, name: impl Into<String>) {
        self.product_name = name.into();
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    /// State of the status checkbox. `JustBought` shows as checked too.
    pub fn needs_purchase(&self) -> bool {
        !self.status.is_in_stock()
    }

    pub fn set_needs_purchase(&mut self, checked: bool) {
        self.status = if checked {
            ProductStatus::ToBuy
        } else {
            ProductStatus::InStock
        };
    }

    pub fn shops(&self) -> &BTreeSet<Shop> {
        &self.shops
    }

    pub fn toggle_shop(&mut self, shop: Shop) {
        if !self.shops.remove(&shop) {
            self.shops.insert(shop);
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Draws every field of [`PRODUCT_FORM_FIELDS`] with its current value.
    pub fn render(&self) -> Vec<RenderedField> {
        PRODUCT_FORM_FIELDS
            .iter()
            .map(|descriptor| RenderedField {
                field: descriptor.field,
                label: descriptor.label,
                required: descriptor.rule == ValidationRule::Required,
                control: self.render_control(descriptor.control),
                error: self.errors.get(descriptor.field).cloned(),
            })
            .collect()
    }

    fn render_control(&self, control: ControlKind) -> RenderedControl {
        match control {
            ControlKind::TextInput { placeholder } => RenderedControl::TextInput {
                value: self.product_name.clone(),
                placeholder,
            },
            ControlKind::StatusCheckbox => RenderedControl::Checkbox {
                checked: self.needs_purchase(),
            },
            ControlKind::ShopToggles => RenderedControl::Toggles(
                Shop::iter()
                    .map(|shop| ShopToggle {
                        shop,
                        selected: self.shops.contains(&shop),
                    })
                    .collect(),
            ),
        }
    }

    /// Validates the values and hands the full product to the submit callback.
    pub fn submit(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;

        let validated = Product::new(NewProductProps {
            product_name: self.product_name.clone(),
            status: self.status,
            shops: self.shops.clone(),
        });

        match validated {
            Ok(product) => {
                let product = match &self.id {
                    Some(id) => product.with_id(id.clone()),
                    None => product,
                };
                self.errors = ValidationErrors::new();
                self.open = false;
                (self.callbacks.submit)(product);
                Ok(())
            }
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "Product form rejected");
                self.errors = errors.clone();
                Err(FormError::Invalid(errors))
            }
        }
    }

    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        self.open = false;
        (self.callbacks.cancel)();
        Ok(())
    }

    /// Hands the product as currently shown to the delete callback.
    pub fn delete(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        let delete = self
            .callbacks
            .delete
            .as_mut()
            .ok_or(FormError::DeleteUnavailable)?;
        self.open = false;
        delete(Product {
            id: self.id.clone(),
            product_name: self.product_name.clone(),
            status: self.status,
            shops: self.shops.clone(),
        });
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.open { Ok(()) } else { Err(FormError::Closed) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::domain::product::validation::{FieldError, ProductField};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorded {
        submitted: Vec<Product>,
        cancelled: usize,
        deleted: Vec<Product>,
    }

    fn callbacks(recorded: &Arc<Mutex<Recorded>>, with_delete: bool) -> ProductFormCallbacks {
        let on_submit = recorded.clone();
        let on_cancel = recorded.clone();
        let on_delete = recorded.clone();
        ProductFormCallbacks {
            submit: Box::new(move |product: Product| on_submit.lock().unwrap().submitted.push(product)),
            cancel: Box::new(move || on_cancel.lock().unwrap().cancelled += 1),
            delete: with_delete.then(|| {
                Box::new(move |product: Product| on_delete.lock().unwrap().deleted.push(product))
                    as DeleteCallback
            }),
        }
    }

    fn existing(status: ProductStatus) -> Product {
        Product::from_repository(
            ProductId::new("1"),
            "Bananen".to_string(),
            status,
            BTreeSet::from([Shop::Jumbo]),
        )
    }

    #[test]
    fn should_not_submit_when_name_is_empty() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(None, callbacks(&recorded, false));

        let result = form.submit();

        assert!(matches!(result, Err(FormError::Invalid(_))));
        assert!(form.is_open());
        assert!(recorded.lock().unwrap().submitted.is_empty());
        assert_eq!(
            form.errors().get(ProductField::ProductName),
            Some(&FieldError::NameEmpty)
        );
    }

    #[test]
    fn should_submit_once_when_valid() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(None, callbacks(&recorded, false));
        form.set_product_name("Kaas");
        form.toggle_shop(Shop::Lidl);

        form.submit().unwrap();

        assert_eq!(form.submit(), Err(FormError::Closed));
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.submitted.len(), 1);
        let product = &recorded.submitted[0];
        assert_eq!(product.id, None);
        assert_eq!(product.product_name, "Kaas");
        assert_eq!(product.status, ProductStatus::ToBuy);
        assert_eq!(product.shops, BTreeSet::from([Shop::Lidl]));
    }

    #[test]
    fn should_clear_errors_after_fixing_name() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(None, callbacks(&recorded, false));
        assert!(form.submit().is_err());

        form.set_product_name("Brood");
        form.submit().unwrap();

        assert!(form.errors().is_empty());
        assert_eq!(recorded.lock().unwrap().submitted.len(), 1);
    }

    #[test]
    fn should_keep_id_when_editing() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(
            Some(existing(ProductStatus::InStock)),
            callbacks(&recorded, true),
        );
        form.set_needs_purchase(true);

        form.submit().unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.submitted[0].id, Some(ProductId::new("1")));
        assert_eq!(recorded.submitted[0].status, ProductStatus::ToBuy);
    }

    #[test]
    fn should_show_just_bought_as_checked_and_keep_it_untouched() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(
            Some(existing(ProductStatus::JustBought)),
            callbacks(&recorded, true),
        );

        assert!(form.needs_purchase());
        form.submit().unwrap();

        assert_eq!(
            recorded.lock().unwrap().submitted[0].status,
            ProductStatus::JustBought
        );
    }

    #[test]
    fn should_add_and_remove_shop_on_toggle() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(
            Some(existing(ProductStatus::ToBuy)),
            callbacks(&recorded, false),
        );

        form.toggle_shop(Shop::Jumbo);
        form.toggle_shop(Shop::Aldi);
        form.toggle_shop(Shop::Aldi);
        form.toggle_shop(Shop::Plus);

        assert_eq!(form.shops(), &BTreeSet::from([Shop::Plus]));
    }

    #[test]
    fn should_call_cancel_without_submitting() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(None, callbacks(&recorded, false));
        form.set_product_name("Bier");

        form.cancel().unwrap();

        assert!(!form.is_open());
        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.cancelled, 1);
        assert!(recorded.submitted.is_empty());
    }

    #[test]
    fn should_delete_only_when_capability_given() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut without = ProductForm::new(
            Some(existing(ProductStatus::ToBuy)),
            callbacks(&recorded, false),
        );
        assert_eq!(without.delete(), Err(FormError::DeleteUnavailable));
        assert!(without.is_open());

        let mut with = ProductForm::new(
            Some(existing(ProductStatus::ToBuy)),
            callbacks(&recorded, true),
        );
        with.delete().unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.deleted.len(), 1);
        assert_eq!(recorded.deleted[0].id, Some(ProductId::new("1")));
        assert!(recorded.submitted.is_empty());
    }

    #[test]
    fn should_render_fields_in_descriptor_order() {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let mut form = ProductForm::new(
            Some(existing(ProductStatus::InStock)),
            callbacks(&recorded, false),
        );
        form.set_product_name("");
        let _ = form.submit();

        let fields = form.render();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].error, Some(FieldError::NameEmpty));
        assert!(fields[0].required);
        assert_eq!(
            fields[1].control,
            RenderedControl::Checkbox { checked: false }
        );
        match &fields[2].control {
            RenderedControl::Toggles(toggles) => {
                assert_eq!(toggles.len(), 5);
                assert!(toggles.iter().any(|t| t.shop == Shop::Jumbo && t.selected));
                assert_eq!(toggles.iter().filter(|t| t.selected).count(), 1);
            }
            other => panic!("expected shop toggles, got {:?}", other),
        }
    }
}
