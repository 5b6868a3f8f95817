use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::mpsc;

use business::application::store::remote_store::{RemoteProductStore, StoreError};
use business::domain::product::events::CollectionChanged;
use business::domain::product::model::Product;
use business::domain::product::value_objects::{ProductStatus, is_in_stock, needs_purchase};

use crate::form::controller::{ProductForm, ProductFormCallbacks};
use crate::view::intent::ProductIntent;
use crate::view::screen::{ProductRow, ReadyScreen, Screen, ShoppingRow, Tab, buy_tab_label};

enum LoadState {
    Loading,
    Failed(String),
    Ready(Vec<Product>),
}

/// Tabbed product / shopping list view over a [`RemoteProductStore`].
///
/// The composer never edits its list in place: every action goes through the
/// store and the list is read again once the store reports the change.
pub struct ViewComposer {
    store: Arc<RemoteProductStore>,
    changes: broadcast::Receiver<CollectionChanged>,
    intents_tx: mpsc::UnboundedSender<ProductIntent>,
    intents_rx: mpsc::UnboundedReceiver<ProductIntent>,
    state: LoadState,
    search: String,
    active_tab: Tab,
    notice: Option<String>,
}

impl ViewComposer {
    pub fn new(store: Arc<RemoteProductStore>) -> Self {
        let changes = store.subscribe();
        let (intents_tx, intents_rx) = mpsc::unbounded_channel();
        Self {
            store,
            changes,
            intents_tx,
            intents_rx,
            state: LoadState::Loading,
            search: String::new(),
            active_tab: Tab::default(),
            notice: None,
        }
    }

    pub fn store(&self) -> &Arc<RemoteProductStore> {
        &self.store
    }

    /// Reads the whole collection and replaces whatever was shown. A failed
    /// re-read keeps the list already on screen and reports it as a notice.
    pub async fn load(&mut self) {
        match self.store.list().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Products loaded");
                self.state = LoadState::Ready(products);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Loading products failed");
                if matches!(self.state, LoadState::Ready(_)) {
                    self.notice = Some(e.to_string());
                } else {
                    self.state = LoadState::Failed(e.to_string());
                }
            }
        }
    }

    /// Drains pending change notifications and reloads once if there were
    /// any. Returns whether a reload happened.
    pub async fn sync(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.changes.try_recv() {
                Ok(_) => changed = true,
                // Missed notifications still mean the list is stale.
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Collection notifications lagged");
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        if changed {
            self.load().await;
        }
        changed
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Products whose name contains the search text, ignoring case.
    pub fn filtered_products(&self) -> Vec<Product> {
        match &self.state {
            LoadState::Ready(products) => products
                .iter()
                .filter(|p| p.matches_search(&self.search))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Products that still need to be bought, search not applied.
    pub fn to_buy(&self) -> Vec<Product> {
        match &self.state {
            LoadState::Ready(products) => products
                .iter()
                .filter(|p| needs_purchase(p.status))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn render(&self) -> Screen {
        match &self.state {
            LoadState::Loading => Screen::Loading,
            LoadState::Failed(message) => Screen::Failed {
                message: message.clone(),
            },
            LoadState::Ready(_) => {
                let products = self
                    .filtered_products()
                    .into_iter()
                    .map(|product| ProductRow {
                        checked: !is_in_stock(product.status),
                        product,
                    })
                    .collect();

                let shopping_list: Vec<ShoppingRow> = self
                    .to_buy()
                    .into_iter()
                    .map(|product| {
                        let bought = product.status == ProductStatus::JustBought;
                        ShoppingRow {
                            product,
                            checked: bought,
                            struck: bought,
                        }
                    })
                    .collect();

                Screen::Ready(ReadyScreen {
                    active_tab: self.active_tab,
                    search: self.search.clone(),
                    products,
                    buy_tab_label: buy_tab_label(shopping_list.len()),
                    shopping_list,
                    notice: self.notice.clone(),
                })
            }
        }
    }

    /// Checkbox of the products tab: in stock or to buy.
    pub async fn toggle_buy(&mut self, product: &Product) {
        let next = product.clone().with_status(product.status.toggle_buy());
        self.apply(ProductIntent::Update(next)).await;
    }

    /// Checkbox of the shopping list: to buy or just bought.
    pub async fn toggle_just_bought(&mut self, product: &Product) {
        let next = product
            .clone()
            .with_status(product.status.toggle_just_bought());
        self.apply(ProductIntent::Update(next)).await;
    }

    /// Form for a new product. Submitting it queues a create intent.
    pub fn add_product_form(&self) -> ProductForm {
        let submit = self.intents_tx.clone();
        ProductForm::new(
            None,
            ProductFormCallbacks {
                submit: Box::new(move |product: Product| queue(&submit, ProductIntent::Create(product))),
                cancel: Box::new(|| tracing::debug!("Add product cancelled")),
                delete: None,
            },
        )
    }

    /// Form for an existing product. Submitting it queues an update intent
    /// and deleting it a remove intent.
    pub fn edit_product_form(&self, product: Product) -> ProductForm {
        let submit = self.intents_tx.clone();
        let delete = self.intents_tx.clone();
        ProductForm::new(
            Some(product),
            ProductFormCallbacks {
                submit: Box::new(move |product: Product| queue(&submit, ProductIntent::Update(product))),
                cancel: Box::new(|| tracing::debug!("Edit product cancelled")),
                delete: Some(Box::new(move |product: Product| {
                    queue(&delete, ProductIntent::Remove(product))
                })),
            },
        )
    }

    /// Sends every queued intent to the store, then resynchronises. Returns
    /// the number of intents handled.
    pub async fn process_intents(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(intent) = self.intents_rx.try_recv() {
            self.apply(intent).await;
            handled += 1;
        }
        handled
    }

    async fn apply(&mut self, intent: ProductIntent) {
        let result = match &intent {
            ProductIntent::Create(product) => self.store.create(product).await.map(|_| ()),
            ProductIntent::Update(product) => self.store.update(product).await.map(|_| ()),
            ProductIntent::Remove(product) => self.store.remove(product).await,
        };

        match result {
            Ok(()) => self.notice = None,
            Err(e) => self.action_failed(&intent, e),
        }
        self.sync().await;
    }

    // The list on screen stays as it was.
    fn action_failed(&mut self, intent: &ProductIntent, error: StoreError) {
        tracing::warn!(?intent, error = %error, "Product action failed");
        self.notice = Some(error.to_string());
    }
}

fn queue(intents: &mpsc::UnboundedSender<ProductIntent>, intent: ProductIntent) {
    if intents.send(intent).is_err() {
        tracing::warn!("Product view is gone, intent dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use business::domain::errors::TransportError;
    use business::domain::logger::Logger;
    use business::domain::product::gateway::{ProductGateway, RemoteStoreConfig};
    use business::domain::product::model::ProductFields;
    use business::domain::product::value_objects::{ProductId, Shop};
    use url::Url;

    struct NoopLogger;

    impl Logger for NoopLogger {
        fn info(&self, _message: &str) {}
        fn warn(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn debug(&self, _message: &str) {}
    }

    /// Collection service kept in memory.
    #[derive(Default)]
    struct InMemoryGateway {
        products: Mutex<Vec<Product>>,
        next_id: AtomicUsize,
        offline: AtomicBool,
        fetches: AtomicUsize,
        /// Fetches beyond this count fail.
        fetch_limit: Mutex<Option<usize>>,
    }

    impl InMemoryGateway {
        fn with(products: Vec<(&str, &str, ProductStatus)>) -> Self {
            let gateway = Self::default();
            *gateway.products.lock().unwrap() = products
                .into_iter()
                .map(|(id, name, status)| {
                    Product::from_repository(
                        ProductId::new(id),
                        name.to_string(),
                        status,
                        BTreeSet::new(),
                    )
                })
                .collect();
            gateway
        }

        fn check_online(&self) -> Result<(), TransportError> {
            if self.offline.load(Ordering::SeqCst) {
                Err(TransportError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn id_of(url: &Url) -> ProductId {
            ProductId::new(url.path_segments().and_then(|s| s.last()).unwrap_or_default())
        }
    }

    #[async_trait]
    impl ProductGateway for InMemoryGateway {
        async fn fetch_all(&self, _url: &Url) -> Result<Vec<Product>, TransportError> {
            self.check_online()?;
            let fetched = self.fetches.fetch_add(1, Ordering::SeqCst);
            let limit = *self.fetch_limit.lock().unwrap();
            if limit.is_some_and(|limit| fetched >= limit) {
                return Err(TransportError::Network("refetch failed".to_string()));
            }
            Ok(self.products.lock().unwrap().clone())
        }

        async fn post(&self, _url: &Url, fields: &ProductFields) -> Result<Product, TransportError> {
            self.check_online()?;
            let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
            let product = Product::from_fields(Some(ProductId::new(id)), fields.clone());
            self.products.lock().unwrap().push(product.clone());
            Ok(product)
        }

        async fn patch(&self, url: &Url, fields: &ProductFields) -> Result<Product, TransportError> {
            self.check_online()?;
            let id = Self::id_of(url);
            let mut products = self.products.lock().unwrap();
            let slot = products
                .iter_mut()
                .find(|p| p.id.as_ref() == Some(&id))
                .ok_or(TransportError::Status { status: 404 })?;
            *slot = Product::from_fields(Some(id), fields.clone());
            Ok(slot.clone())
        }

        async fn delete(&self, url: &Url) -> Result<(), TransportError> {
            self.check_online()?;
            let id = Self::id_of(url);
            let mut products = self.products.lock().unwrap();
            let before = products.len();
            products.retain(|p| p.id.as_ref() != Some(&id));
            if products.len() == before {
                return Err(TransportError::Status { status: 404 });
            }
            Ok(())
        }
    }

    fn composer(gateway: Arc<InMemoryGateway>) -> ViewComposer {
        let config = RemoteStoreConfig::new("http://localhost:6284/api", "products").unwrap();
        let store = RemoteProductStore::new(config, gateway, Arc::new(NoopLogger));
        ViewComposer::new(Arc::new(store))
    }

    fn ready(screen: Screen) -> ReadyScreen {
        match screen {
            Screen::Ready(ready) => ready,
            other => panic!("expected ready screen, got {:?}", other),
        }
    }

    fn names(rows: &[ProductRow]) -> Vec<&str> {
        rows.iter().map(|r| r.product.product_name.as_str()).collect()
    }

    #[tokio::test]
    async fn should_show_loading_before_first_load() {
        let view = composer(Arc::new(InMemoryGateway::default()));

        assert_eq!(view.render(), Screen::Loading);
    }

    #[tokio::test]
    async fn should_show_error_when_service_is_unreachable() {
        let gateway = Arc::new(InMemoryGateway::default());
        gateway.offline.store(true, Ordering::SeqCst);
        let mut view = composer(gateway);

        view.load().await;

        match view.render() {
            Screen::Failed { message } => assert!(message.contains("connection refused")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_filter_products_by_search_ignoring_case() {
        let gateway = Arc::new(InMemoryGateway::with(vec![
            ("1", "Bananas", ProductStatus::InStock),
            ("2", "Bread", ProductStatus::ToBuy),
        ]));
        let mut view = composer(gateway);
        view.load().await;

        view.set_search("BANA");
        let screen = ready(view.render());

        assert_eq!(names(&screen.products), vec!["Bananas"]);
        assert!(!screen.products[0].checked);
        // The shopping list ignores the search.
        assert_eq!(screen.shopping_list.len(), 1);
        assert_eq!(screen.buy_tab_label, "🛍️ Buy (1)");
    }

    #[tokio::test]
    async fn should_list_to_buy_and_just_bought_on_shopping_tab() {
        let gateway = Arc::new(InMemoryGateway::with(vec![
            ("1", "Milk", ProductStatus::InStock),
            ("2", "Eggs", ProductStatus::ToBuy),
            ("3", "Rice", ProductStatus::JustBought),
        ]));
        let mut view = composer(gateway);
        view.load().await;

        let screen = ready(view.render());

        let shopping: Vec<(&str, bool)> = screen
            .shopping_list
            .iter()
            .map(|r| (r.product.product_name.as_str(), r.struck))
            .collect();
        assert_eq!(shopping, vec![("Eggs", false), ("Rice", true)]);
        assert_eq!(screen.buy_tab_label, "🛍️ Buy (2)");
        assert_eq!(screen.products.iter().filter(|r| r.checked).count(), 2);
    }

    #[tokio::test]
    async fn should_put_product_on_shopping_list_when_toggled() {
        let gateway = Arc::new(InMemoryGateway::with(vec![(
            "1",
            "Bread",
            ProductStatus::InStock,
        )]));
        let mut view = composer(gateway.clone());
        view.load().await;
        let bread = view.filtered_products().remove(0);

        view.toggle_buy(&bread).await;

        let screen = ready(view.render());
        assert_eq!(screen.products[0].product.status, ProductStatus::ToBuy);
        assert_eq!(screen.buy_tab_label, "🛍️ Buy (1)");
        assert_eq!(gateway.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_rotate_between_to_buy_and_just_bought() {
        let gateway = Arc::new(InMemoryGateway::with(vec![(
            "1",
            "Eggs",
            ProductStatus::ToBuy,
        )]));
        let mut view = composer(gateway);
        view.load().await;

        let eggs = view.to_buy().remove(0);
        view.toggle_just_bought(&eggs).await;
        let eggs = view.to_buy().remove(0);
        assert_eq!(eggs.status, ProductStatus::JustBought);

        view.toggle_just_bought(&eggs).await;
        assert_eq!(view.to_buy()[0].status, ProductStatus::ToBuy);
    }

    #[tokio::test]
    async fn should_keep_list_and_show_notice_when_update_fails() {
        let gateway = Arc::new(InMemoryGateway::with(vec![(
            "1",
            "Bread",
            ProductStatus::InStock,
        )]));
        let mut view = composer(gateway.clone());
        view.load().await;
        let bread = view.filtered_products().remove(0);

        gateway.offline.store(true, Ordering::SeqCst);
        view.toggle_buy(&bread).await;

        let screen = ready(view.render());
        assert_eq!(screen.products[0].product.status, ProductStatus::InStock);
        assert!(screen.notice.is_some());
    }

    #[tokio::test]
    async fn should_create_product_from_add_form() {
        let gateway = Arc::new(InMemoryGateway::default());
        let mut view = composer(gateway);
        view.load().await;

        let mut form = view.add_product_form();
        form.set_product_name("Kaas");
        form.toggle_shop(Shop::AlbertHeijn);
        form.submit().unwrap();
        let handled = view.process_intents().await;

        assert_eq!(handled, 1);
        let screen = ready(view.render());
        assert_eq!(names(&screen.products), vec!["Kaas"]);
        assert!(screen.products[0].product.is_persisted());
        assert_eq!(screen.shopping_list.len(), 1);
    }

    #[tokio::test]
    async fn should_not_queue_anything_for_invalid_form() {
        let gateway = Arc::new(InMemoryGateway::default());
        let mut view = composer(gateway.clone());
        view.load().await;

        let mut form = view.add_product_form();
        assert!(form.submit().is_err());

        assert_eq!(view.process_intents().await, 0);
        assert!(gateway.products.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_update_and_remove_from_edit_form() {
        let gateway = Arc::new(InMemoryGateway::with(vec![
            ("1", "Bread", ProductStatus::InStock),
            ("2", "Milk", ProductStatus::InStock),
        ]));
        let mut view = composer(gateway);
        view.load().await;
        let products = view.filtered_products();

        let mut edit = view.edit_product_form(products[0].clone());
        edit.set_product_name("Sourdough bread");
        edit.submit().unwrap();
        let mut remove = view.edit_product_form(products[1].clone());
        remove.delete().unwrap();
        view.process_intents().await;

        let screen = ready(view.render());
        assert_eq!(names(&screen.products), vec!["Sourdough bread"]);
        assert_eq!(screen.products[0].product.id, Some(ProductId::new("1")));
    }

    #[tokio::test]
    async fn should_reload_only_when_collection_changed() {
        let gateway = Arc::new(InMemoryGateway::default());
        let mut view = composer(gateway.clone());
        view.load().await;

        assert!(!view.sync().await);

        let kaas = Product::new(business::domain::product::model::NewProductProps {
            product_name: "Kaas".to_string(),
            status: ProductStatus::ToBuy,
            shops: BTreeSet::new(),
        })
        .unwrap();
        view.store().create(&kaas).await.unwrap();

        assert!(view.sync().await);
        assert_eq!(view.filtered_products().len(), 1);
        assert_eq!(gateway.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_keep_list_when_reload_after_update_fails() {
        let gateway = Arc::new(InMemoryGateway::with(vec![(
            "1",
            "Bread",
            ProductStatus::InStock,
        )]));
        *gateway.fetch_limit.lock().unwrap() = Some(1);
        let mut view = composer(gateway.clone());
        view.load().await;
        let bread = view.filtered_products().remove(0);

        view.toggle_buy(&bread).await;

        let screen = ready(view.render());
        assert_eq!(names(&screen.products), vec!["Bread"]);
        assert_eq!(
            screen.notice.as_deref(),
            Some("Could not reach the product service: refetch failed")
        );
        assert_eq!(
            gateway.products.lock().unwrap()[0].status,
            ProductStatus::ToBuy
        );
    }

    #[tokio::test]
    async fn should_recover_from_failed_first_load() {
        let gateway = Arc::new(InMemoryGateway::default());
        gateway.offline.store(true, Ordering::SeqCst);
        let mut view = composer(gateway.clone());
        view.load().await;
        assert!(matches!(view.render(), Screen::Failed { .. }));

        gateway.offline.store(false, Ordering::SeqCst);
        view.load().await;

        assert!(matches!(view.render(), Screen::Ready(_)));
    }
}
