use async_trait::async_trait;
use dashfilter::{
    core::error::TransportError,
    prelude::*,
};
use parking_lot::Mutex;

///
/// MemoryTransport
///
/// Remote engine stand-in: keeps the applied filters by key and logs every
/// call as `"<op> <key>"`.
///

#[derive(Debug, Default)]
pub struct MemoryTransport {
    pub log: Mutex<Vec<String>>,
    pub remote: Mutex<Vec<(FilterKey, Filter)>>,
    pub reject_table: Mutex<Option<String>>,
}

impl MemoryTransport {
    pub fn ops(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn rejects(&self, filter: &Filter) -> bool {
        self.reject_table
            .lock()
            .as_deref()
            .is_some_and(|table| table == filter.target.table)
    }
}

#[async_trait]
impl FilterTransport for MemoryTransport {
    async fn add(&self, id: &FilterKey, filter: &Filter) -> Result<(), TransportError> {
        self.log.lock().push(format!("add {id}"));
        if self.rejects(filter) {
            return Err(TransportError::new("table is read-only"));
        }
        self.remote.lock().push((id.clone(), filter.clone()));
        Ok(())
    }

    async fn replace(&self, id: &FilterKey, filter: &Filter) -> Result<(), TransportError> {
        self.log.lock().push(format!("replace {id}"));
        if self.rejects(filter) {
            return Err(TransportError::new("table is read-only"));
        }
        let mut remote = self.remote.lock();
        remote.retain(|(key, _)| key != id);
        remote.push((id.clone(), filter.clone()));
        Ok(())
    }

    async fn remove(&self, id: &FilterKey) -> Result<(), TransportError> {
        self.log.lock().push(format!("remove {id}"));
        self.remote.lock().retain(|(key, _)| key != id);
        Ok(())
    }
}

///
/// SalesCatalog
///
/// `sales.orders.country` relates to `sales.customers.nation`.
///

pub struct SalesCatalog;

impl RelationCatalog for SalesCatalog {
    fn get_relations(&self, target: &FilterTarget, attributes: &[&str]) -> Vec<Relation> {
        if target.table == "orders" && attributes.contains(&"country") {
            vec![Relation::new(
                &FilterTarget::new("sales", "customers"),
                vec![FieldMapping::new("country", vec!["nation".to_string()])],
            )]
        } else {
            Vec::new()
        }
    }

    fn table_label(&self, target: &FilterTarget) -> String {
        dashfilter::utils::title_case(&target.table)
    }
}
