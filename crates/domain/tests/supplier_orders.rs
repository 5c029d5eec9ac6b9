//! Integration tests for the supplier order workflow.
//!
//! These tests drive the supplier and supplier order services together over
//! one shared in-memory store.

use common::RecordId;
use domain::{DomainError, NewSupplierOrder, SupplierOrderService, SupplierService};
use entity_store::{
    EntityStore, InMemoryRepository, InMemoryStore, Repository, Supplier, SupplierOrderRecord,
};

type Suppliers = InMemoryRepository<Supplier>;
type Orders = InMemoryRepository<SupplierOrderRecord>;

struct Fixture {
    store: InMemoryStore,
    suppliers: SupplierService<Suppliers, Orders>,
    orders: SupplierOrderService<Suppliers, Orders>,
}

/// Helper to build both services over one store
fn setup() -> Fixture {
    let store = InMemoryStore::new();
    Fixture {
        suppliers: SupplierService::new(store.suppliers(), store.supplier_orders()),
        orders: SupplierOrderService::new(store.suppliers(), store.supplier_orders()),
        store,
    }
}

mod order_lifecycle {
    use super::*;

    #[tokio::test]
    async fn acme_walkthrough() {
        let fx = setup();

        let acme = fx.suppliers.create(Supplier::named("Acme")).await.unwrap();
        assert_eq!(acme.id, Some(RecordId::new(1)));

        let order = fx
            .orders
            .create_order(NewSupplierOrder::new(RecordId::new(1), "[]", Some(0.0)))
            .await
            .unwrap();
        assert_eq!(order.supplier.company_name, "Acme");
        let order_id = order.id.unwrap();

        let missing = fx
            .orders
            .create_order(NewSupplierOrder::new(RecordId::new(999), "[]", Some(0.0)))
            .await;
        assert!(matches!(missing, Err(ref e) if e.is_not_found()));

        fx.orders.delete_order(order_id).await.unwrap();
        let second = fx.orders.delete_order(order_id).await;
        assert!(matches!(second, Err(DomainError::OrderNotFound(id)) if id == order_id));
    }

    #[tokio::test]
    async fn returned_supplier_is_the_stored_one() {
        let fx = setup();
        let stored = fx
            .suppliers
            .create(Supplier {
                contact_person_first_name: "Ravi".to_string(),
                email: "ravi@acme.test".to_string(),
                ..Supplier::named("Acme")
            })
            .await
            .unwrap();

        let order = fx
            .orders
            .create_order(NewSupplierOrder::new(stored.id.unwrap(), "[{\"sku\":1}]", None))
            .await
            .unwrap();

        assert_eq!(order.supplier, stored);
        assert_eq!(order.items, "[{\"sku\":1}]");
    }

    #[tokio::test]
    async fn deleted_order_disappears_from_listing() {
        let fx = setup();
        let acme = fx.suppliers.create(Supplier::named("Acme")).await.unwrap();
        let acme_id = acme.id.unwrap();

        let first = fx
            .orders
            .create_order(NewSupplierOrder::new(acme_id, "[]", Some(10.0)))
            .await
            .unwrap();
        let second = fx
            .orders
            .create_order(NewSupplierOrder::new(acme_id, "[]", Some(20.0)))
            .await
            .unwrap();

        fx.orders.delete_order(first.id.unwrap()).await.unwrap();

        let remaining: Vec<Option<RecordId>> = fx
            .orders
            .get_all_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(remaining, [second.id]);
    }

    #[tokio::test]
    async fn failed_delete_leaves_storage_unchanged() {
        let fx = setup();
        let acme = fx.suppliers.create(Supplier::named("Acme")).await.unwrap();
        fx.orders
            .create_order(NewSupplierOrder::new(acme.id.unwrap(), "[]", None))
            .await
            .unwrap();

        let before = fx.orders.get_all_orders().await.unwrap();
        let result = fx.orders.delete_order(RecordId::new(404)).await;
        let after = fx.orders.get_all_orders().await.unwrap();

        assert!(matches!(result, Err(DomainError::OrderNotFound(_))));
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn rejected_order_persists_nothing() {
        let fx = setup();

        let result = fx
            .orders
            .create_order(NewSupplierOrder::new(RecordId::new(7), "[]", Some(5.0)))
            .await;

        assert!(matches!(result, Err(DomainError::SupplierNotFound(_))));
        assert!(fx.store.supplier_orders().find_all().await.unwrap().is_empty());
        assert!(fx.orders.get_all_orders().await.unwrap().is_empty());
    }
}

mod referential_integrity {
    use super::*;

    #[tokio::test]
    async fn supplier_with_orders_cannot_be_deleted_until_orders_are_gone() {
        let fx = setup();
        let acme = fx.suppliers.create(Supplier::named("Acme")).await.unwrap();
        let acme_id = acme.id.unwrap();

        let mut order_ids = Vec::new();
        for _ in 0..2 {
            let order = fx
                .orders
                .create_order(NewSupplierOrder::new(acme_id, "[]", None))
                .await
                .unwrap();
            order_ids.push(order.id.unwrap());
        }

        let result = fx.suppliers.delete(acme_id).await;
        assert!(matches!(
            result,
            Err(DomainError::SupplierInUse { supplier_id, order_count: 2 }) if supplier_id == acme_id
        ));
        assert!(fx.suppliers.get_by_id(acme_id).await.unwrap().is_some());
        assert_eq!(fx.orders.get_all_orders().await.unwrap().len(), 2);

        for id in order_ids {
            fx.orders.delete_order(id).await.unwrap();
        }
        fx.suppliers.delete(acme_id).await.unwrap();
        assert!(fx.suppliers.get_by_id(acme_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn other_suppliers_stay_deletable() {
        let fx = setup();
        let acme = fx.suppliers.create(Supplier::named("Acme")).await.unwrap();
        let globex = fx.suppliers.create(Supplier::named("Globex")).await.unwrap();
        fx.orders
            .create_order(NewSupplierOrder::new(acme.id.unwrap(), "[]", None))
            .await
            .unwrap();

        fx.suppliers.delete(globex.id.unwrap()).await.unwrap();

        let names: Vec<String> = fx
            .suppliers
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.company_name)
            .collect();
        assert_eq!(names, ["Acme"]);
    }
}

mod search {
    use super::*;

    #[tokio::test]
    async fn search_is_case_insensitive_and_empty_term_matches_all() {
        let fx = setup();
        fx.suppliers
            .create(Supplier {
                contact_person_last_name: "Smith".to_string(),
                ..Supplier::named("Acme")
            })
            .await
            .unwrap();
        fx.suppliers.create(Supplier::named("Globex")).await.unwrap();

        let upper = fx.suppliers.search("SMITH").await.unwrap();
        let lower = fx.suppliers.search("smith").await.unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);

        assert_eq!(fx.suppliers.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn wildcard_characters_match_literally() {
        let fx = setup();
        fx.suppliers.create(Supplier::named("100% Organic")).await.unwrap();
        fx.suppliers.create(Supplier::named("Acme")).await.unwrap();

        let hits = fx.suppliers.search("%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company_name, "100% Organic");
    }
}
