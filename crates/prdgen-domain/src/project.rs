//! Structured project description submitted for PRD generation.

use serde::Serialize;

use crate::tech_stack::{TechStack, TechStackInput};

/// Maximum title length accepted for a PRD.
pub const MAX_TITLE_LEN: usize = 255;

/// Validation failures for a project brief. Messages name the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BriefError {
    #[error("title is required")]
    BlankTitle,
    #[error("title must be at most 255 characters")]
    TitleTooLong,
    #[error("description is required")]
    BlankDescription,
    #[error("techStack must contain at least one entry")]
    EmptyTechStack,
    #[error("at least one page is required")]
    NoPages,
    #[error("pages[{0}].name is required")]
    BlankPageName(usize),
    #[error("pages[{0}] requires at least one function")]
    NoFunctions(usize),
}

/// A page and the functions it must offer, as they appear in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageOutline {
    pub name: String,
    pub functions: Vec<String>,
}

/// Unvalidated brief fields as received from a caller.
#[derive(Debug, Clone)]
pub struct RawBrief {
    pub title: String,
    pub description: String,
    pub tech_stack: TechStackInput,
    pub pages: Vec<PageOutline>,
}

/// A validated project brief, ready to be compiled into a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBrief {
    pub title: String,
    pub description: String,
    pub tech_stack: TechStack,
    pub pages: Vec<PageOutline>,
}

impl ProjectBrief {
    /// Validate and normalize a raw brief.
    ///
    /// Title and description are trimmed. Blank function entries are dropped;
    /// every page must keep a name and at least one function.
    pub fn validate(raw: RawBrief) -> Result<Self, BriefError> {
        let title = validate_title(&raw.title)?;
        let description = raw.description.trim();
        if description.is_empty() {
            return Err(BriefError::BlankDescription);
        }
        let tech_stack = TechStack::from(raw.tech_stack);
        if tech_stack.is_empty() {
            return Err(BriefError::EmptyTechStack);
        }
        if raw.pages.is_empty() {
            return Err(BriefError::NoPages);
        }

        let mut pages = Vec::with_capacity(raw.pages.len());
        for (index, page) in raw.pages.into_iter().enumerate() {
            let name = page.name.trim();
            if name.is_empty() {
                return Err(BriefError::BlankPageName(index));
            }
            let functions: Vec<String> = page
                .functions
                .into_iter()
                .map(|f| f.trim().to_owned())
                .filter(|f| !f.is_empty())
                .collect();
            if functions.is_empty() {
                return Err(BriefError::NoFunctions(index));
            }
            pages.push(PageOutline {
                name: name.to_owned(),
                functions,
            });
        }

        Ok(Self {
            title,
            description: description.to_owned(),
            tech_stack,
            pages,
        })
    }
}

/// Trim a PRD title and check it is non-blank and within [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<String, BriefError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BriefError::BlankTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(BriefError::TitleTooLong);
    }
    Ok(title.to_owned())
}
