use crate::models::{College, TestRecord};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::{json, Map, Value};
use std::time::Duration;
use thiserror::Error;

/// Upper bound on documents fetched per catalog listing
const CATALOG_PAGE_LIMIT: usize = 5000;

/// Upper bound on admin documents scanned per lookup
const ADMIN_PAGE_LIMIT: usize = 1000;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Appwrite API client
///
/// Handles all communication with the hosted document database:
/// - College catalog CRUD
/// - Student profile documents
/// - Aptitude test results
/// - Admin allow-list
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub colleges: String,
    pub students: String,
    pub tests: String,
    pub admins: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    fn documents_url(&self, collection: &str) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        )
    }

    fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!(
            "{}/{}",
            self.documents_url(collection),
            urlencoding::encode(document_id)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
    }

    /// List documents matching Appwrite query strings
    async fn list_documents(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, AppwriteError> {
        let mut url = self.documents_url(collection);
        for (i, query) in queries.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str("queries[]=");
            url.push_str(&urlencoding::encode(query));
        }

        let response = self.request(Method::GET, &url).send().await?;
        let response = check_status(response, collection).await?;

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        tracing::debug!(
            "Listed {} documents from {} (total: {})",
            documents.len(),
            collection,
            total
        );

        Ok(documents.iter().map(document_data).collect())
    }

    async fn get_document(&self, collection: &str, document_id: &str) -> Result<Value, AppwriteError> {
        let url = self.document_url(collection, document_id);

        let response = self.request(Method::GET, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!(
                "Document {} not found in {}",
                document_id, collection
            )));
        }
        let response = check_status(response, collection).await?;

        let json: Value = response.json().await?;
        Ok(document_data(&json))
    }

    /// Create a document and return its assigned id
    async fn create_document(&self, collection: &str, data: Value) -> Result<String, AppwriteError> {
        let url = self.documents_url(collection);

        let payload = json!({
            "documentId": uuid::Uuid::new_v4().simple().to_string(),
            "data": data,
        });

        let response = self.request(Method::POST, &url).json(&payload).send().await?;
        let response = check_status(response, collection).await?;

        let json: Value = response.json().await?;
        json.get("$id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing $id in created document".into()))
    }

    async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        changes: Map<String, Value>,
    ) -> Result<(), AppwriteError> {
        let url = self.document_url(collection, document_id);

        let response = self
            .request(Method::PATCH, &url)
            .json(&json!({ "data": changes }))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Document {} not found", document_id)));
        }
        check_status(response, collection).await?;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, document_id: &str) -> Result<(), AppwriteError> {
        let url = self.document_url(collection, document_id);

        let response = self.request(Method::DELETE, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppwriteError::NotFound(format!("Document {} not found", document_id)));
        }
        check_status(response, collection).await?;
        Ok(())
    }

    /// Fetch colleges, optionally restricted to one location
    ///
    /// Documents that do not parse as a college are skipped.
    pub async fn list_colleges(&self, location: Option<&str>) -> Result<Vec<College>, AppwriteError> {
        let mut queries = vec![format!("limit({})", CATALOG_PAGE_LIMIT)];
        if let Some(location) = location.filter(|l| !l.is_empty()) {
            queries.push(equal_query("location", location));
        }

        let documents = self.list_documents(&self.collections.colleges, &queries).await?;

        let colleges: Vec<College> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value::<College>(doc) {
                Ok(college) => Some(college),
                Err(e) => {
                    tracing::warn!("Skipping malformed college document: {}", e);
                    None
                }
            })
            .collect();

        Ok(colleges)
    }

    /// Catalog source contract: any retrieval failure yields an empty list
    pub async fn get_colleges(&self, location: Option<&str>) -> Vec<College> {
        match self.list_colleges(location).await {
            Ok(colleges) => colleges,
            Err(e) => {
                tracing::error!("get_colleges failed (location: {:?}): {}", location, e);
                Vec::new()
            }
        }
    }

    pub async fn get_college(&self, college_id: &str) -> Result<College, AppwriteError> {
        let doc = self.get_document(&self.collections.colleges, college_id).await?;
        serde_json::from_value(doc)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse college: {}", e)))
    }

    pub async fn add_college(&self, document: Value) -> Result<String, AppwriteError> {
        let id = self.create_document(&self.collections.colleges, document).await?;
        tracing::info!("Added college {}", id);
        Ok(id)
    }

    pub async fn update_college(
        &self,
        college_id: &str,
        changes: Map<String, Value>,
    ) -> Result<(), AppwriteError> {
        self.update_document(&self.collections.colleges, college_id, changes).await?;
        tracing::info!("Updated college {}", college_id);
        Ok(())
    }

    pub async fn delete_college(&self, college_id: &str) -> Result<(), AppwriteError> {
        self.delete_document(&self.collections.colleges, college_id).await?;
        tracing::info!("Deleted college {}", college_id);
        Ok(())
    }

    /// Fetch the raw student document by id
    pub async fn get_student(&self, student_id: &str) -> Result<Value, AppwriteError> {
        self.get_document(&self.collections.students, student_id).await
    }

    /// Profile source contract: not found and retrieval failures both yield `None`
    pub async fn find_student(&self, student_id: &str) -> Option<Value> {
        match self.get_student(student_id).await {
            Ok(doc) => Some(doc),
            Err(AppwriteError::NotFound(_)) => None,
            Err(e) => {
                tracing::error!("find_student failed for {}: {}", student_id, e);
                None
            }
        }
    }

    pub async fn create_student(&self, document: Value) -> Result<String, AppwriteError> {
        self.create_document(&self.collections.students, document).await
    }

    pub async fn save_test_result(&self, record: &TestRecord) -> Result<String, AppwriteError> {
        let data = serde_json::to_value(record)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode test result: {}", e)))?;
        self.create_document(&self.collections.tests, data).await
    }

    /// Case-insensitive lookup in the admin allow-list
    ///
    /// Appwrite's `equal` query is case-sensitive, so the allow-list is
    /// fetched whole and compared here.
    pub async fn is_admin_by_email(&self, email: &str) -> Result<bool, AppwriteError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Ok(false);
        }

        let queries = vec![format!("limit({})", ADMIN_PAGE_LIMIT)];
        let documents = self.list_documents(&self.collections.admins, &queries).await?;

        Ok(documents.iter().any(|doc| {
            doc.get("email")
                .and_then(|e| e.as_str())
                .is_some_and(|stored| stored.trim().to_lowercase() == email)
        }))
    }

    pub async fn add_admin(&self, email: &str, added_by: &str) -> Result<String, AppwriteError> {
        let document = json!({
            "email": email.trim().to_lowercase(),
            "addedBy": added_by,
            "createdAt": chrono::Utc::now(),
        });
        self.create_document(&self.collections.admins, document).await
    }
}

/// Build an Appwrite `equal` query with a properly escaped value
fn equal_query(attribute: &str, value: &str) -> String {
    format!("equal(\"{}\", {})", attribute, json!([value]))
}

/// Flatten an Appwrite document into its field map, exposing `$id` as `id`
fn document_data(doc: &Value) -> Value {
    let mut data = doc.get("data").unwrap_or(doc).clone();
    if let (Some(obj), Some(id)) = (data.as_object_mut(), doc.get("$id").cloned()) {
        obj.remove("$id");
        obj.insert("id".to_string(), id);
    }
    data
}

async fn check_status(
    response: reqwest::Response,
    collection: &str,
) -> Result<reqwest::Response, AppwriteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(AppwriteError::Unauthorized);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read body".to_string());
    tracing::error!("Appwrite request on {} failed: {} - {}", collection, status, body);
    Err(AppwriteError::ApiError(format!("{} returned {}", collection, status)))
}
