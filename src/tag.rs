/// 請求書の明細に載せないタグかどうかを判定する。
///
/// 空白で区切ると1語になり、かつ`.`を含むタグ(`proj.123`など)を内部管理用のタグとみなす。
pub fn is_structural(tag: &str) -> bool {
    tag.contains('.') && tag.split_whitespace().count() == 1
}

/// 内部管理用のタグを取り除き、残ったタグを元の順序で返す。
///
/// # Arguments
///
/// * `tags` - time entryに付与されたタグ
pub fn filter_tags(tags: &[String]) -> Vec<String> {
    tags.iter()
        .filter(|tag| !is_structural(tag))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{filter_tags, is_structural};

    #[rstest]
    #[case::code("proj.123", true)]
    #[case::many_periods("a.b.c", true)]
    #[case::only_period(".", true)]
    #[case::surrounding_spaces(" ticket.9 ", true)]
    #[case::multi_word_with_period("v1.2 release notes", false)]
    #[case::single_word("meeting", false)]
    #[case::empty("", false)]
    fn test_is_structural(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(is_structural(tag), expected);
    }

    #[rstest]
    #[case::mixed(&["proj.42", "design review"], &["design review"])]
    #[case::all_structural(&["a.b.c"], &[])]
    #[case::keep_empty(&["", "x"], &["", "x"])]
    #[case::keep_order_and_duplicates(&["b", "x.y", "a", "b"], &["b", "a", "b"])]
    #[case::no_tags(&[], &[])]
    fn test_filter_tags(#[case] input: &[&str], #[case] expected: &[&str]) {
        let tags: Vec<String> = input.iter().map(|tag| tag.to_string()).collect();

        assert_eq!(filter_tags(&tags), expected);
    }
}
