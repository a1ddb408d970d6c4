/// Formatting actions a block toolbar can offer.
///
/// Each maps onto one browser editing command (`document.execCommand`) so the
/// `contenteditable` surface stays the only owner of the markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    BulletList,
    NumberedList,
    Link,
    Heading(u8),
    Image,
}

impl FormatCommand {
    /// Browser command name plus optional value.
    ///
    /// `active` is the current query state; headings toggle back to a paragraph.
    pub fn exec_args(self, active: bool) -> (&'static str, Option<String>) {
        match self {
            FormatCommand::Bold => ("bold", None),
            FormatCommand::Italic => ("italic", None),
            FormatCommand::Underline => ("underline", None),
            FormatCommand::Strike => ("strikeThrough", None),
            FormatCommand::Code => ("insertHTML", None),
            FormatCommand::BulletList => ("insertUnorderedList", None),
            FormatCommand::NumberedList => ("insertOrderedList", None),
            FormatCommand::Link => ("createLink", None),
            FormatCommand::Image => ("insertImage", None),
            FormatCommand::Heading(level) => {
                if active {
                    ("formatBlock", Some("<p>".to_string()))
                } else {
                    ("formatBlock", Some(format!("<h{level}>")))
                }
            }
        }
    }

    /// Name used with `document.queryCommandState`, if the command has one.
    pub fn state_query(self) -> Option<&'static str> {
        match self {
            FormatCommand::Bold => Some("bold"),
            FormatCommand::Italic => Some("italic"),
            FormatCommand::Underline => Some("underline"),
            FormatCommand::Strike => Some("strikeThrough"),
            FormatCommand::BulletList => Some("insertUnorderedList"),
            FormatCommand::NumberedList => Some("insertOrderedList"),
            FormatCommand::Code
            | FormatCommand::Link
            | FormatCommand::Heading(_)
            | FormatCommand::Image => None,
        }
    }

    /// Prompt text for commands that need a URL first.
    pub fn prompt(self) -> Option<&'static str> {
        match self {
            FormatCommand::Link => Some("Enter URL"),
            FormatCommand::Image => Some("Enter image URL"),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarItem {
    pub icon: &'static str,
    pub label: &'static str,
    pub command: FormatCommand,
}

const fn item(icon: &'static str, label: &'static str, command: FormatCommand) -> ToolbarItem {
    ToolbarItem {
        icon,
        label,
        command,
    }
}

const TEXT_FORMATTING: [ToolbarItem; 8] = [
    item("B", "Bold", FormatCommand::Bold),
    item("I", "Italic", FormatCommand::Italic),
    item("‾", "Underline", FormatCommand::Underline),
    item("~", "Strike", FormatCommand::Strike),
    item("<>", "Code", FormatCommand::Code),
    item("•", "Bullet List", FormatCommand::BulletList),
    item("1.", "Numbered List", FormatCommand::NumberedList),
    item("↩", "Link", FormatCommand::Link),
];

pub fn toolbar_for(block_type: &str) -> Vec<ToolbarItem> {
    match block_type {
        "heading1" => vec![item("H1", "Heading 1", FormatCommand::Heading(1))],
        "heading2" => vec![item("H2", "Heading 2", FormatCommand::Heading(2))],
        "bulletList" => vec![item("Bullet List", "Bullet List", FormatCommand::BulletList)],
        "image" => vec![item("Add Image", "Add Image", FormatCommand::Image)],
        _ => TEXT_FORMATTING.to_vec(),
    }
}

/// Wrap a selection in `<code>` for the inline-code command.
///
/// The selection text arrives unescaped from the DOM.
pub fn inline_code_html(selected: &str) -> String {
    let mut out = String::with_capacity(selected.len() + 13);
    out.push_str("<code>");
    for ch in selected.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            c => out.push(c),
        }
    }
    out.push_str("</code>");
    out
}

/// A prompt answer worth acting on; cancelled or blank prompts are no-ops.
pub fn accepted_url(answer: Option<String>) -> Option<String> {
    answer
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn labels(items: &[ToolbarItem]) -> Vec<&'static str> {
        items.iter().map(|i| i.label).collect()
    }

    #[rstest]
    #[case("heading1", FormatCommand::Heading(1))]
    #[case("heading2", FormatCommand::Heading(2))]
    #[case("bulletList", FormatCommand::BulletList)]
    #[case("image", FormatCommand::Image)]
    fn test_specialized_toolbars_have_single_item(
        #[case] block_type: &str,
        #[case] command: FormatCommand,
    ) {
        let items = toolbar_for(block_type);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].command, command);
    }

    #[rstest]
    #[case("text")]
    #[case("quote")]
    #[case("callout")]
    #[case("somethingNew")]
    fn test_default_toolbar_is_full_formatting_set(#[case] block_type: &str) {
        assert_eq!(
            labels(&toolbar_for(block_type)),
            vec![
                "Bold",
                "Italic",
                "Underline",
                "Strike",
                "Code",
                "Bullet List",
                "Numbered List",
                "Link"
            ]
        );
    }

    #[test]
    fn test_heading_toggles_back_to_paragraph() {
        assert_eq!(
            FormatCommand::Heading(2).exec_args(false),
            ("formatBlock", Some("<h2>".to_string()))
        );
        assert_eq!(
            FormatCommand::Heading(2).exec_args(true),
            ("formatBlock", Some("<p>".to_string()))
        );
    }

    #[test]
    fn test_prompts_only_for_url_commands() {
        assert_eq!(FormatCommand::Link.prompt(), Some("Enter URL"));
        assert_eq!(FormatCommand::Image.prompt(), Some("Enter image URL"));
        assert_eq!(FormatCommand::Bold.prompt(), None);
    }

    #[test]
    fn test_accepted_url() {
        assert_eq!(accepted_url(None), None);
        assert_eq!(accepted_url(Some("   ".to_string())), None);
        assert_eq!(
            accepted_url(Some(" https://x.dev ".to_string())),
            Some("https://x.dev".to_string())
        );
    }

    #[test]
    fn test_inline_code_escapes_selection() {
        assert_eq!(inline_code_html("a<b"), "<code>a&lt;b</code>");
    }
}
