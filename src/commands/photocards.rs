//! Photocard Commands
//!
//! PostgREST bindings for the `photocards` catalog and `user_pcs` statuses.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use super::{send_empty, send_json, PhotocardBackend, SupabaseClient};
use crate::error::ApiResult;
use crate::models::{Photocard, Status, StatusRow, UserPc};

const CATALOG_TABLE: &str = "photocards";
const STATUS_TABLE: &str = "user_pcs";

#[derive(Serialize)]
struct StatusPatch {
    status: Status,
}

fn eq_filter(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

// ========================
// Request Builders
// ========================

impl SupabaseClient {
    fn catalog_request(&self) -> RequestBuilder {
        self.request(Method::GET, &self.config().rest_url(CATALOG_TABLE))
            .query(&[("select", "*"), ("order", "order.asc")])
    }

    fn statuses_request(&self, user_id: &str) -> RequestBuilder {
        self.request(Method::GET, &self.config().rest_url(STATUS_TABLE))
            .query(&[("select", "pc_id,status".to_string()), ("user_id", eq_filter(user_id))])
    }

    fn update_request(&self, user_id: &str, pc_id: i64, status: Status) -> RequestBuilder {
        self.request(Method::PATCH, &self.config().rest_url(STATUS_TABLE))
            .query(&[("user_id", eq_filter(user_id)), ("pc_id", eq_filter(pc_id))])
            .header("Prefer", "return=representation")
            .json(&StatusPatch { status })
    }

    fn insert_request(&self, user_id: &str, pc_id: i64, status: Status) -> RequestBuilder {
        let row = UserPc {
            user_id: user_id.to_string(),
            pc_id,
            status,
        };
        self.request(Method::POST, &self.config().rest_url(STATUS_TABLE))
            .header("Prefer", "return=minimal")
            .json(&row)
    }

    fn delete_request(&self, user_id: &str, pc_id: i64) -> RequestBuilder {
        self.request(Method::DELETE, &self.config().rest_url(STATUS_TABLE))
            .query(&[("user_id", eq_filter(user_id)), ("pc_id", eq_filter(pc_id))])
    }
}

// ========================
// Commands
// ========================

#[async_trait(?Send)]
impl PhotocardBackend for SupabaseClient {
    async fn read_catalog(&self) -> ApiResult<Vec<Photocard>> {
        send_json(self.catalog_request()).await
    }

    async fn read_statuses(&self, user_id: &str) -> ApiResult<Vec<StatusRow>> {
        send_json(self.statuses_request(user_id)).await
    }

    async fn update_status(&self, user_id: &str, pc_id: i64, status: Status) -> ApiResult<Vec<UserPc>> {
        send_json(self.update_request(user_id, pc_id, status)).await
    }

    async fn insert_status(&self, user_id: &str, pc_id: i64, status: Status) -> ApiResult<()> {
        send_empty(self.insert_request(user_id, pc_id, status)).await
    }

    async fn delete_status(&self, user_id: &str, pc_id: i64) -> ApiResult<()> {
        send_empty(self.delete_request(user_id, pc_id)).await
    }
}
