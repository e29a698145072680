use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use prdgen_core::deadline::with_deadline;
use prdgen_domain::id::{OwnerId, new_record_id};
use prdgen_domain::tech_stack::TechStack;
use prdgen_prds_schema::{page_functions, pages, prds, users};

use crate::domain::repository::{PrdRepository, UserRepository};
use crate::domain::types::{
    NewPrd, Prd, PrdDetail, PrdSummary, StoredFunction, StoredPage, User,
};
use crate::error::PrdServiceError;

// ── PRD repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPrdRepository {
    pub db: DatabaseConnection,
    /// Upper bound for each repository call, transaction included.
    pub timeout: Duration,
}

impl PrdRepository for DbPrdRepository {
    async fn create(&self, prd: &NewPrd) -> Result<PrdDetail, PrdServiceError> {
        let tx = self.db.transaction::<_, Option<PrdDetail>, DbErr>(|txn| {
            let prd = prd.clone();
            Box::pin(async move {
                insert_aggregate(txn, &prd).await?;
                load_detail(txn, &prd.id, &prd.owner).await
            })
        });
        let detail = with_deadline(self.timeout, "create prd aggregate", tx).await?;
        detail.ok_or_else(|| anyhow::anyhow!("created prd vanished before it could be read").into())
    }

    async fn find(&self, id: &str, owner: &OwnerId) -> Result<Option<PrdDetail>, PrdServiceError> {
        let detail = with_deadline(
            self.timeout,
            "find prd by id",
            load_detail(&self.db, id, owner),
        )
        .await?;
        Ok(detail)
    }

    async fn list(
        &self,
        owner: &OwnerId,
        title_filter: Option<&str>,
    ) -> Result<Vec<PrdSummary>, PrdServiceError> {
        let mut query = prds::Entity::find()
            .select_only()
            .columns([
                prds::Column::Id,
                prds::Column::Title,
                prds::Column::Description,
                prds::Column::TechStack,
                prds::Column::CreatedAt,
                prds::Column::UpdatedAt,
            ])
            .filter(prds::Column::UserId.eq(owner.as_str()));
        if let Some(needle) = title_filter {
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((prds::Entity, prds::Column::Title))))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }
        let rows = with_deadline(
            self.timeout,
            "list prds",
            query
                .order_by_desc(prds::Column::UpdatedAt)
                .order_by_desc(prds::Column::Id)
                .into_model::<SummaryRow>()
                .all(&self.db),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| PrdSummary {
                id: row.id,
                title: row.title,
                description: row.description,
                tech_stack: tech_stack_from_json(row.tech_stack),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
            .collect())
    }

    async fn update_content(
        &self,
        id: &str,
        owner: &OwnerId,
        content: &str,
    ) -> Result<Option<Prd>, PrdServiceError> {
        let id = id.to_owned();
        let owner = owner.as_str().to_owned();
        let content = content.to_owned();
        let tx = self.db.transaction::<_, Option<Prd>, DbErr>(|txn| {
            Box::pin(async move {
                let result = prds::Entity::update_many()
                    .col_expr(prds::Column::Content, Expr::value(content))
                    .col_expr(prds::Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(prds::Column::Id.eq(id.as_str()))
                    .filter(prds::Column::UserId.eq(owner.as_str()))
                    .exec(txn)
                    .await?;
                if result.rows_affected == 0 {
                    return Ok(None);
                }
                let model = find_owned(txn, &id, &owner).await?;
                Ok(model.map(prd_from_model))
            })
        });
        let prd = with_deadline(self.timeout, "update prd content", tx).await?;
        Ok(prd)
    }

    async fn delete(&self, id: &str, owner: &OwnerId) -> Result<Option<Prd>, PrdServiceError> {
        let id = id.to_owned();
        let owner = owner.as_str().to_owned();
        let tx = self.db.transaction::<_, Option<Prd>, DbErr>(|txn| {
            Box::pin(async move {
                let Some(model) = find_owned(txn, &id, &owner).await? else {
                    return Ok(None);
                };
                delete_prd_rows(txn, vec![model.id.clone()]).await?;
                Ok(Some(prd_from_model(model)))
            })
        });
        let prd = with_deadline(self.timeout, "delete prd aggregate", tx).await?;
        Ok(prd)
    }
}

#[derive(FromQueryResult)]
struct SummaryRow {
    id: String,
    title: String,
    description: Option<String>,
    tech_stack: serde_json::Value,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

async fn insert_aggregate<C: ConnectionTrait>(conn: &C, prd: &NewPrd) -> Result<(), DbErr> {
    prds::Entity::insert(prds::ActiveModel {
        id: Set(prd.id.clone()),
        title: Set(prd.title.clone()),
        description: Set(prd.description.clone()),
        tech_stack: Set(tech_stack_to_json(&prd.tech_stack)),
        content: Set(prd.content.clone()),
        published: Set(false),
        user_id: Set(prd.owner.as_str().to_owned()),
        created_at: Set(prd.created_at),
        updated_at: Set(prd.created_at),
    })
    .exec_without_returning(conn)
    .await?;

    for (position, page) in prd.pages.iter().enumerate() {
        let page_id = new_record_id();
        pages::Entity::insert(pages::ActiveModel {
            id: Set(page_id.clone()),
            prd_id: Set(prd.id.clone()),
            name: Set(page.name.clone()),
            position: Set(position as i32),
        })
        .exec_without_returning(conn)
        .await?;

        if page.functions.is_empty() {
            continue;
        }
        let functions = page
            .functions
            .iter()
            .enumerate()
            .map(|(position, name)| page_functions::ActiveModel {
                id: Set(new_record_id()),
                page_id: Set(page_id.clone()),
                name: Set(name.clone()),
                position: Set(position as i32),
            });
        page_functions::Entity::insert_many(functions)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(())
}

async fn find_owned<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    owner: &str,
) -> Result<Option<prds::Model>, DbErr> {
    prds::Entity::find()
        .filter(prds::Column::Id.eq(id))
        .filter(prds::Column::UserId.eq(owner))
        .one(conn)
        .await
}

async fn load_detail<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    owner: &OwnerId,
) -> Result<Option<PrdDetail>, DbErr> {
    let Some(model) = find_owned(conn, id, owner.as_str()).await? else {
        return Ok(None);
    };

    let page_models = pages::Entity::find()
        .filter(pages::Column::PrdId.eq(id))
        .order_by_asc(pages::Column::Position)
        .all(conn)
        .await?;
    let page_ids: Vec<String> = page_models.iter().map(|p| p.id.clone()).collect();
    let function_models = if page_ids.is_empty() {
        Vec::new()
    } else {
        page_functions::Entity::find()
            .filter(page_functions::Column::PageId.is_in(page_ids))
            .order_by_asc(page_functions::Column::Position)
            .all(conn)
            .await?
    };

    let mut by_page: HashMap<String, Vec<StoredFunction>> = HashMap::new();
    for f in function_models {
        by_page.entry(f.page_id.clone()).or_default().push(StoredFunction {
            id: f.id,
            page_id: f.page_id,
            name: f.name,
        });
    }
    let pages = page_models
        .into_iter()
        .map(|p| {
            let functions = by_page.remove(&p.id).unwrap_or_default();
            StoredPage {
                id: p.id,
                prd_id: p.prd_id,
                name: p.name,
                functions,
            }
        })
        .collect();

    Ok(Some(PrdDetail {
        prd: prd_from_model(model),
        pages,
    }))
}

/// Remove PRDs with their pages and functions, children first.
async fn delete_prd_rows<C: ConnectionTrait>(conn: &C, prd_ids: Vec<String>) -> Result<(), DbErr> {
    if prd_ids.is_empty() {
        return Ok(());
    }
    let page_ids: Vec<String> = pages::Entity::find()
        .select_only()
        .column(pages::Column::Id)
        .filter(pages::Column::PrdId.is_in(prd_ids.clone()))
        .into_tuple()
        .all(conn)
        .await?;
    if !page_ids.is_empty() {
        page_functions::Entity::delete_many()
            .filter(page_functions::Column::PageId.is_in(page_ids))
            .exec(conn)
            .await?;
    }
    pages::Entity::delete_many()
        .filter(pages::Column::PrdId.is_in(prd_ids.clone()))
        .exec(conn)
        .await?;
    prds::Entity::delete_many()
        .filter(prds::Column::Id.is_in(prd_ids))
        .exec(conn)
        .await?;
    Ok(())
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn tech_stack_to_json(stack: &TechStack) -> serde_json::Value {
    serde_json::Value::from(stack.as_slice().to_vec())
}

fn tech_stack_from_json(value: serde_json::Value) -> TechStack {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => TechStack::default(),
    }
}

fn prd_from_model(m: prds::Model) -> Prd {
    Prd {
        id: m.id,
        title: m.title,
        description: m.description,
        tech_stack: tech_stack_from_json(m.tech_stack),
        content: m.content,
        published: m.published,
        user_id: m.user_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
    pub timeout: Duration,
}

impl UserRepository for DbUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), PrdServiceError> {
        let now = Utc::now();
        let insert = users::Entity::insert(users::ActiveModel {
            id: Set(user.id.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            image_url: Set(user.image_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::column(users::Column::Id)
                .update_columns([
                    users::Column::Email,
                    users::Column::FirstName,
                    users::Column::LastName,
                    users::Column::ImageUrl,
                    users::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&self.db);
        with_deadline(self.timeout, "upsert user", insert).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, PrdServiceError> {
        let id = id.to_owned();
        let tx = self.db.transaction::<_, bool, DbErr>(|txn| {
            Box::pin(async move {
                let prd_ids: Vec<String> = prds::Entity::find()
                    .select_only()
                    .column(prds::Column::Id)
                    .filter(prds::Column::UserId.eq(id.as_str()))
                    .into_tuple()
                    .all(txn)
                    .await?;
                delete_prd_rows(txn, prd_ids).await?;
                let result = users::Entity::delete_by_id(id).exec(txn).await?;
                Ok(result.rows_affected > 0)
            })
        });
        let deleted = with_deadline(self.timeout, "delete user", tx).await?;
        Ok(deleted)
    }
}
