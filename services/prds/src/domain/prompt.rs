//! Prompt compilation: fills a template's `{{NAME}}` placeholders from a project brief.

use prdgen_domain::project::{PageOutline, ProjectBrief};

pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const PROJECT_DESCRIPTION: &str = "PROJECT_DESCRIPTION";
pub const TECH_STACK: &str = "TECH_STACK";
pub const PAGE_LIST: &str = "PAGE_LIST";

/// Substitute every placeholder occurrence in a single pass.
///
/// Values are inserted verbatim and never rescanned, so brief text that happens to
/// contain `{{…}}` survives untouched. Unknown placeholders are left as-is.
pub fn compile_prompt(template: &str, brief: &ProjectBrief) -> String {
    let tech_stack = brief.tech_stack.joined();
    let page_list = render_page_list(&brief.pages);
    let lookup = |key: &str| match key {
        PROJECT_NAME => Some(brief.title.as_str()),
        PROJECT_DESCRIPTION => Some(brief.description.as_str()),
        TECH_STACK => Some(tech_stack.as_str()),
        PAGE_LIST => Some(page_list.as_str()),
        _ => None,
    };

    let mut out = String::with_capacity(template.len() + page_list.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        match lookup(&after[..end]) {
            Some(value) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Pretty-printed JSON array of `{name, functions}` objects.
pub fn render_page_list(pages: &[PageOutline]) -> String {
    serde_json::to_string_pretty(pages).unwrap_or_else(|_| "[]".to_owned())
}

/// Placeholder names missing from `template`.
pub fn missing_placeholders(template: &str) -> Vec<&'static str> {
    [PROJECT_NAME, PROJECT_DESCRIPTION, TECH_STACK, PAGE_LIST]
        .into_iter()
        .filter(|name| !template.contains(&format!("{{{{{name}}}}}")))
        .collect()
}
