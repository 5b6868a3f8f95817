//! Headless state of the grocery list front-end: the product form and the
//! tabbed product / shopping list view, synchronised with the collection
//! service through the remote product store.

pub mod app;
pub mod form {
    pub mod controller;
    pub mod descriptor;
    pub mod errors;
}
pub mod view {
    pub mod composer;
    pub mod intent;
    pub mod screen;
}
