use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::{Product, ProductCandidate};
use crate::domain::product::repository::ProductRepository;
use crate::domain::product::use_cases::create::{CreateProductParams, CreateProductUseCase};
use crate::domain::product::value_objects::ProductId;

pub struct CreateProductUseCaseImpl {
    pub repository: Arc<dyn ProductRepository>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateProductUseCase for CreateProductUseCaseImpl {
    async fn execute(&self, params: CreateProductParams) -> Result<Product, ProductError> {
        self.logger
            .info(&format!("Creating product: {}", params.product_name));

        let product = Product::from_candidate(ProductCandidate {
            id: None,
            product_name: params.product_name,
            status: params.status,
            shops: params.shops,
        })
        .inspect_err(|e| self.logger.debug(&format!("Rejected new product: {:?}", e)))?
        .with_id(ProductId::generate());

        self.repository.save(&product).await?;

        if let Some(id) = &product.id {
            self.logger.info(&format!("Product created with id: {}", id));
        }
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::validation::{FieldError, ProductField};
    use crate::domain::product::value_objects::{ProductStatus, Shop};
    use mockall::mock;

    mock! {
        pub ProductRepo {}

        #[async_trait]
        impl ProductRepository for ProductRepo {
            async fn get_all(&self) -> Result<Vec<Product>, RepositoryError>;
            async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError>;
            async fn save(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn update(&self, product: &Product) -> Result<(), RepositoryError>;
            async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    #[tokio::test]
    async fn should_assign_id_when_creating_valid_product() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_save()
            .withf(|product| product.id.is_some())
            .times(1)
            .returning(|_| Ok(()));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let product = use_case
            .execute(CreateProductParams {
                product_name: "Kaas".to_string(),
                status: "To buy".to_string(),
                shops: vec!["Jumbo".to_string()],
            })
            .await
            .unwrap();

        assert!(product.is_persisted());
        assert_eq!(product.product_name, "Kaas");
        assert_eq!(product.status, ProductStatus::ToBuy);
        assert!(product.shops.contains(&Shop::Jumbo));
    }

    #[tokio::test]
    async fn should_reject_product_when_name_is_empty() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo.expect_save().never();

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(CreateProductParams {
                product_name: "".to_string(),
                status: "To buy".to_string(),
                shops: vec![],
            })
            .await;

        match result {
            Err(ProductError::Validation(errors)) => assert_eq!(
                errors.get(ProductField::ProductName),
                Some(&FieldError::NameEmpty)
            ),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_propagate_repository_failure() {
        let mut mock_repo = MockProductRepo::new();
        mock_repo
            .expect_save()
            .returning(|_| Err(RepositoryError::Persistence));

        let use_case = CreateProductUseCaseImpl {
            repository: Arc::new(mock_repo),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(CreateProductParams {
                product_name: "Melk".to_string(),
                status: "In stock".to_string(),
                shops: vec![],
            })
            .await;

        assert!(matches!(
            result,
            Err(ProductError::Repository(RepositoryError::Persistence))
        ));
    }
}
