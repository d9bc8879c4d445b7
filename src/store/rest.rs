// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use super::schema::{catalog_filters, resolve_variant, ProbeOutcome, SchemaVariant};
use super::{DiagramStore, StoreError};
use crate::model::{DiagramId, DiagramRecord, ProjectId, Scope, UserId};

const TABLE: &str = "process_diagrams";

/// PostgREST-style client for the hosted diagram table.
///
/// Auth is a single service key sent as both `apikey` and bearer token. The schema variant is
/// probed once at construction; every later query builds its filters from the resolved variant.
pub struct RestDiagramStore {
    client: Client,
    base_url: String,
    api_key: String,
    variant: SchemaVariant,
}

impl RestDiagramStore {
    pub fn connect(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let base_url = base_url.into();
        let api_key = api_key.into();
        let client = Client::builder().build().map_err(|err| StoreError::Transport {
            url: base_url.clone(),
            source: Box::new(err),
        })?;

        let variant = resolve_variant(|candidate| {
            probe_project_column(&client, &base_url, &api_key, candidate)
        });
        log::info!("resolved diagram table schema variant: {variant:?}");

        Ok(Self {
            client,
            base_url,
            api_key,
            variant,
        })
    }

    /// Skips the probe; used when the variant is already known.
    pub fn with_variant(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        variant: SchemaVariant,
    ) -> Result<Self, StoreError> {
        let base_url = base_url.into();
        let client = Client::builder().build().map_err(|err| StoreError::Transport {
            url: base_url.clone(),
            source: Box::new(err),
        })?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            variant,
        })
    }

    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    fn table_url(&self) -> String {
        table_url(&self.base_url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn send(&self, url: &str, builder: RequestBuilder) -> Result<Response, StoreError> {
        let response = builder.send().map_err(|err| StoreError::Transport {
            url: url.to_owned(),
            source: Box::new(err),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(StoreError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl DiagramStore for RestDiagramStore {
    fn list(&self, scope: &Scope) -> Result<Vec<DiagramRecord>, StoreError> {
        let url = self.table_url();
        let mut query = catalog_filters(self.variant, scope);
        query.push(("select".to_owned(), "*".to_owned()));
        query.push(("order".to_owned(), "updated_at.desc".to_owned()));

        let builder = self.authorized(self.client.get(&url).query(&query));
        let response = self.send(&url, builder)?;
        let rows: Vec<DiagramRow> = response.json().map_err(|err| StoreError::Transport {
            url: url.clone(),
            source: Box::new(err),
        })?;

        rows.into_iter().map(|row| row.into_record(scope)).collect()
    }

    fn insert(&self, record: &DiagramRecord) -> Result<(), StoreError> {
        let url = self.table_url();
        let payload = row_payload(self.variant, record);
        let builder = self
            .authorized(self.client.post(&url).json(&payload))
            .header("Prefer", "return=minimal");
        self.send(&url, builder).map(|_| ())
    }

    fn update(&self, record: &DiagramRecord) -> Result<(), StoreError> {
        let url = self.table_url();
        let query = row_filters(record.diagram_id(), record.scope().owner_user_id());
        let payload = update_payload(record);
        let builder = self
            .authorized(self.client.patch(&url).query(&query).json(&payload))
            .header("Prefer", "return=minimal");
        self.send(&url, builder).map(|_| ())
    }

    fn delete(&self, scope: &Scope, diagram_id: &DiagramId) -> Result<(), StoreError> {
        let url = self.table_url();
        let query = row_filters(diagram_id, scope.owner_user_id());
        let builder = self.authorized(self.client.delete(&url).query(&query));
        // PostgREST deletes zero rows with a success status, which matches the idempotent
        // contract of `DiagramStore::delete`.
        self.send(&url, builder).map(|_| ())
    }
}

fn table_url(base_url: &str) -> String {
    format!("{}/rest/v1/{TABLE}", base_url.trim_end_matches('/'))
}

/// Row-addressing filters shared by update and delete. The owner filter rides along with the id
/// so a mutation can never touch another user's row, whatever the id says.
fn row_filters(diagram_id: &DiagramId, owner_user_id: &UserId) -> [(String, String); 2] {
    [
        ("id".to_owned(), format!("eq.{diagram_id}")),
        ("owner_user_id".to_owned(), format!("eq.{owner_user_id}")),
    ]
}

/// Probes whether the variant's project column exists by selecting only that column. PostgREST
/// rejects a select of a missing column, so any non-success (or transport failure) means
/// "unsupported" and the probe falls through.
fn probe_project_column(
    client: &Client,
    base_url: &str,
    api_key: &str,
    variant: SchemaVariant,
) -> ProbeOutcome {
    let Some(column) = variant.project_column() else {
        return ProbeOutcome::Supported;
    };

    let url = table_url(base_url);
    let result = client
        .get(&url)
        .query(&[("select", column), ("limit", "1")])
        .header("apikey", api_key)
        .bearer_auth(api_key)
        .send();

    match result {
        Ok(response) if response.status().is_success() => ProbeOutcome::Supported,
        Ok(response) => {
            log::debug!(
                "schema probe for column {column} rejected with status {}",
                response.status()
            );
            ProbeOutcome::Unsupported
        }
        Err(err) => {
            log::warn!("schema probe for column {column} failed: {err}");
            ProbeOutcome::Unsupported
        }
    }
}

/// Wire row. Ids stay strings here and are validated when converting to the model, and the
/// project column is accepted under either historical name.
#[derive(Debug, Deserialize)]
struct DiagramRow {
    id: String,
    owner_user_id: String,
    #[serde(default, alias = "projectId")]
    project_id: Option<String>,
    name: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    preview: Option<String>,
    updated_at: DateTime<Utc>,
}

impl DiagramRow {
    /// An owner-only listing can return rows without a project column; those are attributed to
    /// the requesting scope, which is exactly the "show everything the user owns" degradation.
    fn into_record(self, scope: &Scope) -> Result<DiagramRecord, StoreError> {
        let diagram_id = DiagramId::parse(&self.id).map_err(|source| StoreError::InvalidId {
            field: "id",
            value: self.id.clone(),
            source,
        })?;
        let owner_user_id =
            UserId::parse(&self.owner_user_id).map_err(|source| StoreError::InvalidId {
                field: "owner_user_id",
                value: self.owner_user_id.clone(),
                source,
            })?;
        let project_id = match &self.project_id {
            Some(value) => ProjectId::parse(value).map_err(|source| StoreError::InvalidId {
                field: "project_id",
                value: value.clone(),
                source,
            })?,
            None => *scope.project_id(),
        };

        Ok(DiagramRecord::new(
            diagram_id,
            Scope::new(project_id, owner_user_id),
            self.name,
            self.body,
            self.preview,
            self.updated_at,
        ))
    }
}

fn row_payload(variant: SchemaVariant, record: &DiagramRecord) -> Value {
    let mut payload = json!({
        "id": record.diagram_id().to_string(),
        "owner_user_id": record.scope().owner_user_id().to_string(),
        "name": record.name(),
        "body": record.body(),
        "preview": record.preview(),
        "updated_at": record.updated_at().to_rfc3339(),
    });
    if let Some(column) = variant.project_column() {
        payload[column] = Value::String(record.scope().project_id().to_string());
    }
    payload
}

fn update_payload(record: &DiagramRecord) -> Value {
    json!({
        "name": record.name(),
        "body": record.body(),
        "preview": record.preview(),
        "updated_at": record.updated_at().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::{row_filters, row_payload, table_url, DiagramRow};
    use crate::model::fixtures;
    use crate::store::{SchemaVariant, StoreError};

    #[test]
    fn table_url_tolerates_a_trailing_slash() {
        assert_eq!(
            table_url("https://example.supabase.co/"),
            "https://example.supabase.co/rest/v1/process_diagrams"
        );
        assert_eq!(
            table_url("https://example.supabase.co"),
            "https://example.supabase.co/rest/v1/process_diagrams"
        );
    }

    #[test]
    fn mutations_filter_by_id_and_owner() {
        let scope = fixtures::scope();
        let record = fixtures::record(&scope, "X", 5);

        let filters = row_filters(record.diagram_id(), scope.owner_user_id());

        assert_eq!(filters[0].0, "id");
        assert_eq!(filters[0].1, format!("eq.{}", record.diagram_id()));
        assert_eq!(filters[1].0, "owner_user_id");
        assert_eq!(filters[1].1, format!("eq.{}", scope.owner_user_id()));
    }

    #[test]
    fn row_payload_places_the_project_id_under_the_variant_column() {
        let scope = fixtures::scope();
        let record = fixtures::record(&scope, "X", 5);

        let camel = row_payload(SchemaVariant::ProjectCamel, &record);
        assert_eq!(
            camel["projectId"].as_str(),
            Some(scope.project_id().to_string().as_str())
        );
        assert!(camel.get("project_id").is_none());

        let snake = row_payload(SchemaVariant::ProjectSnake, &record);
        assert_eq!(
            snake["project_id"].as_str(),
            Some(scope.project_id().to_string().as_str())
        );

        let owner_only = row_payload(SchemaVariant::OwnerOnly, &record);
        assert!(owner_only.get("projectId").is_none());
        assert!(owner_only.get("project_id").is_none());
    }

    #[test]
    fn row_deserializes_under_either_project_column_name() {
        let scope = fixtures::scope();
        let raw = format!(
            r#"{{
                "id": "8f9f2b9e-0f43-4f10-8c3a-6f9f0a3a1d2e",
                "owner_user_id": "{owner}",
                "projectId": "{project}",
                "name": "Order Fulfilment",
                "body": "<xml/>",
                "preview": null,
                "updated_at": "2026-01-05T10:00:00Z"
            }}"#,
            owner = scope.owner_user_id(),
            project = scope.project_id(),
        );
        let row: DiagramRow = serde_json::from_str(&raw).expect("camel row");
        let record = row.into_record(&scope).expect("into record");
        assert_eq!(record.scope().project_id(), scope.project_id());
        assert_eq!(record.name(), "Order Fulfilment");

        let raw = raw.replace("projectId", "project_id");
        let row: DiagramRow = serde_json::from_str(&raw).expect("snake row");
        row.into_record(&scope).expect("into record");
    }

    #[test]
    fn row_without_a_project_column_falls_back_to_the_requesting_scope() {
        let scope = fixtures::scope();
        let raw = format!(
            r#"{{
                "id": "8f9f2b9e-0f43-4f10-8c3a-6f9f0a3a1d2e",
                "owner_user_id": "{owner}",
                "name": "Orphan",
                "updated_at": "2026-01-05T10:00:00Z"
            }}"#,
            owner = scope.owner_user_id(),
        );
        let row: DiagramRow = serde_json::from_str(&raw).expect("owner-only row");
        let record = row.into_record(&scope).expect("into record");
        assert_eq!(record.scope().project_id(), scope.project_id());
        assert_eq!(record.body(), "");
    }

    #[test]
    fn row_with_a_malformed_id_is_rejected() {
        let scope = fixtures::scope();
        let raw = format!(
            r#"{{
                "id": "not-a-uuid",
                "owner_user_id": "{owner}",
                "name": "Broken",
                "updated_at": "2026-01-05T10:00:00Z"
            }}"#,
            owner = scope.owner_user_id(),
        );
        let row: DiagramRow = serde_json::from_str(&raw).expect("row");
        let err = row.into_record(&scope).unwrap_err();
        assert!(matches!(err, StoreError::InvalidId { field: "id", .. }));
    }
}
