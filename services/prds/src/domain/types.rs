use chrono::{DateTime, Utc};

use prdgen_domain::id::{OwnerId, new_record_id};
use prdgen_domain::project::PageOutline;
use prdgen_domain::tech_stack::TechStack;

/// A stored PRD record without its pages.
#[derive(Debug, Clone)]
pub struct Prd {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: TechStack,
    pub content: Option<String>,
    pub published: bool,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row: the fields shown in a user's PRD index.
#[derive(Debug, Clone)]
pub struct PrdSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: TechStack,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StoredFunction {
    pub id: String,
    pub page_id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct StoredPage {
    pub id: String,
    pub prd_id: String,
    pub name: String,
    /// In submission order.
    pub functions: Vec<StoredFunction>,
}

/// A PRD with its pages and their functions.
#[derive(Debug, Clone)]
pub struct PrdDetail {
    pub prd: Prd,
    /// In submission order.
    pub pages: Vec<StoredPage>,
}

/// Result of creating a PRD from a client-supplied aggregate.
#[derive(Debug, Clone)]
pub struct CreatedPrd {
    pub detail: PrdDetail,
    /// Indices (into the submitted pages) of pages dropped for lacking a name.
    pub skipped_pages: Vec<usize>,
}

/// Everything needed to insert one PRD aggregate.
#[derive(Debug, Clone)]
pub struct NewPrd {
    pub id: String,
    pub owner: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub tech_stack: TechStack,
    pub content: Option<String>,
    pub pages: Vec<PageOutline>,
    pub created_at: DateTime<Utc>,
}

impl NewPrd {
    pub fn new(
        owner: OwnerId,
        title: String,
        description: Option<String>,
        tech_stack: TechStack,
        content: Option<String>,
        pages: Vec<PageOutline>,
    ) -> Self {
        Self {
            id: new_record_id(),
            owner,
            title,
            description,
            tech_stack,
            content,
            pages,
            created_at: Utc::now(),
        }
    }

    pub fn function_count(&self) -> usize {
        self.pages.iter().map(|p| p.functions.len()).sum()
    }
}

/// Owner record mirrored from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

/// A verified identity-provider event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityEvent {
    Upsert(User),
    Delete { user_id: String },
    Ignored { event_type: String },
}
