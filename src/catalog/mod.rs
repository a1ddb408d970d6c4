use strum::{AsRefStr, Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Text,
    Media,
    Layout,
    Interactive,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockOption {
    pub id: &'static str,
    pub block_type: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub category: Category,
}

const fn opt(
    id: &'static str,
    icon: &'static str,
    label: &'static str,
    category: Category,
) -> BlockOption {
    BlockOption {
        id,
        block_type: id,
        icon,
        label,
        category,
    }
}

/// Every block type offered by the "Add Block" menu, in display order.
///
/// Not every type has a dedicated editor; unknown ones fall back to the rich-text surface.
pub const BLOCK_OPTIONS: &[BlockOption] = &[
    opt("text", "📝", "Text", Category::Text),
    opt("heading1", "H1", "Heading 1", Category::Text),
    opt("heading2", "H2", "Heading 2", Category::Text),
    opt("bulletList", "•", "Bullet List", Category::Text),
    opt("numberedList", "1.", "Numbered List", Category::Text),
    opt("quote", "\"", "Quote", Category::Text),
    opt("code", "<>", "Code Block", Category::Text),
    opt("image", "🖼️", "Image", Category::Media),
    opt("video", "🎥", "Video", Category::Media),
    opt("embed", "🔗", "Embed", Category::Media),
    opt("gallery", "🖼️", "Gallery", Category::Media),
    opt("columns", "⫴", "Columns", Category::Layout),
    opt("divider", "—", "Divider", Category::Layout),
    opt("spacer", "↕️", "Spacer", Category::Layout),
    opt("button", "🔘", "Button", Category::Interactive),
    opt("form", "📋", "Form", Category::Interactive),
    opt("table", "🗃️", "Table", Category::Interactive),
    opt("tabs", "📑", "Tabs", Category::Interactive),
    opt("callout", "💡", "Callout", Category::Other),
    opt("codeSnippet", "⌨️", "Code Snippet", Category::Other),
];

/// Quick-access grid at the top of the menu.
pub const FEATURED_IDS: [&str; 6] = ["text", "heading1", "image", "bulletList", "columns", "button"];

pub fn featured() -> Vec<&'static BlockOption> {
    BLOCK_OPTIONS
        .iter()
        .filter(|b| FEATURED_IDS.contains(&b.id))
        .collect()
}

/// Case-insensitive label match, grouped by category.
///
/// Groups come out in the order their first member appears in the catalog; members keep
/// catalog order.
pub fn filter(search: &str) -> Vec<(Category, Vec<&'static BlockOption>)> {
    let needle = search.to_lowercase();
    let mut groups: Vec<(Category, Vec<&'static BlockOption>)> = vec![];

    for b in BLOCK_OPTIONS
        .iter()
        .filter(|b| b.label.to_lowercase().contains(&needle))
    {
        match groups.iter_mut().find(|(c, _)| *c == b.category) {
            Some((_, members)) => members.push(b),
            None => groups.push((b.category, vec![b])),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn ids(options: &[&BlockOption]) -> Vec<&'static str> {
        options.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for b in BLOCK_OPTIONS {
            assert!(seen.insert(b.id), "duplicate id {}", b.id);
        }
        assert_eq!(BLOCK_OPTIONS.len(), 20);
    }

    #[test]
    fn test_featured_is_fixed_six_in_catalog_order() {
        assert_eq!(
            ids(&featured()),
            vec!["text", "heading1", "bulletList", "image", "columns", "button"]
        );
    }

    #[test]
    fn test_empty_search_returns_all_grouped_in_catalog_order() {
        let groups = filter("");
        let cats: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(cats, Category::iter().collect::<Vec<_>>());
        let total: usize = groups.iter().map(|(_, m)| m.len()).sum();
        assert_eq!(total, BLOCK_OPTIONS.len());
    }

    #[rstest]
    #[case("HEAD", vec!["heading1", "heading2"])]
    #[case("code", vec!["code", "codeSnippet"])]
    #[case("list", vec!["bulletList", "numberedList"])]
    #[case("zzz", vec![])]
    fn test_filter_is_case_insensitive_substring(
        #[case] search: &str,
        #[case] expected: Vec<&str>,
    ) {
        let found: Vec<&str> = filter(search)
            .into_iter()
            .flat_map(|(_, members)| members.into_iter().map(|b| b.id))
            .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_filter_groups_by_category() {
        let groups = filter("code");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Text);
        assert_eq!(ids(&groups[0].1), vec!["code"]);
        assert_eq!(groups[1].0, Category::Other);
        assert_eq!(ids(&groups[1].1), vec!["codeSnippet"]);
    }

    #[test]
    fn test_category_renders_lowercase() {
        assert_eq!(Category::Interactive.to_string(), "interactive");
        assert_eq!(Category::Media.as_ref(), "media");
    }
}
