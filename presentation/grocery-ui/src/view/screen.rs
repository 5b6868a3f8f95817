use business::domain::product::model::Product;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Products,
    ShoppingList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub product: Product,
    /// Checked while the product needs to be bought.
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingRow {
    pub product: Product,
    /// Checked once the product is in the basket.
    pub checked: bool,
    pub struck: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyScreen {
    pub active_tab: Tab,
    pub search: String,
    pub products: Vec<ProductRow>,
    pub shopping_list: Vec<ShoppingRow>,
    pub buy_tab_label: String,
    /// Message of the last failed action, if any.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Failed { message: String },
    Ready(ReadyScreen),
}

pub fn buy_tab_label(to_buy: usize) -> String {
    if to_buy == 0 {
        "🛍️ Buy".to_string()
    } else {
        format!("🛍️ Buy ({})", to_buy)
    }
}
