//! Markdown templates for the report sections.
//!
//! Templates use `{{name}}` placeholders filled by [`render_template`]. Rows
//! are pre-rendered and substituted as a single `{{rows}}` block.

/// Cross-repository summary table.
pub const SUMMARY_TEMPLATE: &str = "\
#### Summary

| Repository | Issues | Pull Requests | Pull Request Reviews |
| :--- | ---: | ---: | ---: |
{{rows}}
";

/// One summary row.
pub const SUMMARY_ROW_TEMPLATE: &str =
    "| [{{repository}}]({{repositoryUrl}}) | {{issues}} | {{pullRequests}} | {{pullRequestReviews}} |";

/// Issues created.
pub const ISSUES_TEMPLATE: &str = "\
#### Issues

| Repository | Created | Title | State |
| :--- | :--- | :--- | :--- |
{{rows}}
";

pub const ISSUE_ROW_TEMPLATE: &str =
    "| [{{repository}}]({{repositoryUrl}}) | {{createdAt}} | [{{title}}]({{url}}) | {{state}} |";

/// Pull requests opened.
pub const PULL_REQUESTS_TEMPLATE: &str = "\
#### Pull Requests

| Repository | Created | Title | Changed Files | State |
| :--- | :--- | :--- | ---: | :--- |
{{rows}}
";

pub const PULL_REQUEST_ROW_TEMPLATE: &str = "| [{{repository}}]({{repositoryUrl}}) | {{createdAt}} | [{{title}}]({{url}}) | {{changedFiles}} | {{state}} |";

/// Pull requests reviewed.
pub const PULL_REQUEST_REVIEWS_TEMPLATE: &str = "\
#### Pull Request Reviews

| Repository | Created | Pull Request | State |
| :--- | :--- | :--- | :--- |
{{rows}}
";

pub const PULL_REQUEST_REVIEW_ROW_TEMPLATE: &str =
    "| [{{repository}}]({{repositoryUrl}}) | {{createdAt}} | [{{title}}]({{url}}) | {{state}} |";

/// Substitutes every `{{name}}` placeholder that has a binding.
///
/// Placeholders without a binding are left as-is. Substituted values are not
/// rescanned, so a value containing `{{...}}` is emitted literally.
pub fn render_template(template: &str, bindings: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after_open[..end].trim();
        match bindings.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after_open[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_placeholders() {
        let out = render_template("Hello {{ name }}, {{greeting}}!", &[("name", "octo"), ("greeting", "hi")]);
        assert_eq!(out, "Hello octo, hi!");
    }

    #[test]
    fn leaves_unknown_placeholders_untouched() {
        assert_eq!(render_template("{{missing}} x", &[]), "{{missing}} x");
    }

    #[test]
    fn values_are_not_rescanned() {
        let out = render_template("{{a}}", &[("a", "{{b}}"), ("b", "nope")]);
        assert_eq!(out, "{{b}}");
    }

    #[test]
    fn unterminated_placeholder_is_copied() {
        assert_eq!(render_template("a {{b", &[("b", "x")]), "a {{b");
    }
}
