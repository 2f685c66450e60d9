use editor_core_wrap::{
    LineBreakData, LineBreakScratch, MonospaceLineBreaksComputerFactory, WrappingCharacterClassifier,
    WrappingIndent, WrappingParams, compute_char_width, create_line_breaks,
    create_line_breaks_from_previous,
};
use pretty_assertions::assert_eq;

fn params(tab_size: usize, column: usize, indent: WrappingIndent) -> WrappingParams {
    WrappingParams::new(tab_size, Some(column)).with_wrapping_indent(indent)
}

fn fresh(text: &str, params: &WrappingParams) -> Option<LineBreakData> {
    create_line_breaks(&WrappingCharacterClassifier::default(), text, &[], params)
}

fn rewrap(previous: LineBreakData, text: &str, params: &WrappingParams) -> Option<LineBreakData> {
    let mut scratch = LineBreakScratch::new();
    create_line_breaks_from_previous(
        &WrappingCharacterClassifier::default(),
        previous,
        text,
        params,
        &mut scratch,
    )
}

/// Re-wrapping from one column to the other must give the same result as a fresh scan, both ways.
fn assert_incremental_matches_fresh(text: &str, first: WrappingParams, second: WrappingParams) {
    let fresh_first = fresh(text, &first);
    let fresh_second = fresh(text, &second);

    if let Some(previous) = fresh_first.clone() {
        assert_eq!(rewrap(previous, text, &second), fresh_second, "{first:?} -> {second:?}");
    }
    if let Some(previous) = fresh_second {
        assert_eq!(rewrap(previous, text, &first), fresh_first, "{second:?} -> {first:?}");
    }
}

/// Every break moves forward and the last one ends the line.
fn assert_well_formed(data: &LineBreakData, len: usize) {
    assert_eq!(data.break_offsets.len(), data.break_offsets_visible_column.len());
    assert!(data.break_offsets.windows(2).all(|w| w[0] < w[1]), "{data:?}");
    assert_eq!(data.break_offsets.last(), Some(&len));
}

#[test]
fn test_rewrap_words_matches_fresh() {
    assert_incremental_matches_fresh(
        "just some text and more",
        params(4, 10, WrappingIndent::None),
        params(4, 15, WrappingIndent::None),
    );
}

#[test]
fn test_rewrap_across_a_tab_matches_fresh() {
    let text = "a\tbbbbbbbb";
    let narrow = params(4, 3, WrappingIndent::None);
    let wide = params(4, 6, WrappingIndent::None);

    assert_eq!(fresh(text, &narrow).unwrap().break_offsets, vec![1, 2, 5, 8, 10]);
    assert_eq!(fresh(text, &wide).unwrap().break_offsets, vec![2, 8, 10]);
    assert_incremental_matches_fresh(text, narrow, wide);
}

#[test]
fn test_rewrap_to_unchanged_column_is_identity() {
    let text = "just some text and more";
    let params = params(4, 10, WrappingIndent::None);
    let previous = fresh(text, &params).unwrap();
    assert_eq!(rewrap(previous.clone(), text, &params), Some(previous));
}

#[test]
fn test_rewrap_deeply_indented_line_terminates() {
    let text = format!(
        "{}<tr><td>{{{{ReviewerName}}}}</td><td>{{{{ReviewerComment}}}}</td></tr>",
        "\t".repeat(24)
    );
    let len = text.chars().count();
    let first = params(4, 109, WrappingIndent::Indent);
    let second = params(4, 123, WrappingIndent::Indent);

    for (from, to) in [(first, second), (second, first)] {
        let previous = fresh(&text, &from).unwrap();
        let data = rewrap(previous, &text, &to).unwrap();
        assert_well_formed(&data, len);
    }
}

#[test]
fn test_rewrap_to_a_single_column_terminates() {
    let text = "你好 **hello** **hello** **hello-world** hey there!";
    let len = text.chars().count();
    let wide = params(4, 15, WrappingIndent::Same).with_columns_for_full_width_char(1.6605405405405405);
    let narrow = WrappingParams {
        wrapping_column: Some(1),
        ..wide
    };

    let previous = fresh(text, &wide).unwrap();
    let data = rewrap(previous, text, &narrow).unwrap();
    assert_well_formed(&data, len);
    // Every character ends up on a row of its own.
    assert_eq!(data.output_line_count(), len);
}

#[test]
fn test_rewrap_through_the_computer() {
    let text = "a\tbbbbbbbb";
    let factory = MonospaceLineBreaksComputerFactory::default();

    let mut computer = factory.create_line_breaks_computer(params(4, 6, WrappingIndent::None));
    computer.add_request(text, None, None);
    let previous = computer.finalize().pop().flatten().unwrap();

    let narrow = params(4, 3, WrappingIndent::None);
    let mut computer = factory
        .create_line_breaks_computer(narrow)
        .with_scratch(computer.into_scratch());
    computer.add_request(text, None, Some(previous));
    let data = computer.finalize().pop().flatten().unwrap();

    assert_eq!(Some(data), fresh(text, &narrow));
}

#[test]
fn test_previous_data_is_ignored_for_escaped_line_feeds() {
    let text = r#"let s = "first\nsecond";"#;
    let factory = MonospaceLineBreaksComputerFactory::default();
    let plain = params(4, 12, WrappingIndent::None);
    let escaped = plain.with_wrap_on_escaped_line_feeds(true);

    let mut computer = factory.create_line_breaks_computer(plain);
    computer.add_request(text, None, None);
    let previous = computer.finalize().pop().flatten().unwrap();

    let mut computer = factory.create_line_breaks_computer(escaped);
    computer.add_request(text, None, Some(previous));
    let data = computer.finalize().pop().flatten();

    assert_eq!(data, fresh(text, &escaped));
}

#[test]
fn test_same_length_edit_is_rewrapped_from_scratch() {
    let text = "aaaaa a世世界aaaa世界({";
    let edited = "aaaaa a 世界aaaa世界({";
    assert_eq!(text.chars().count(), edited.chars().count());

    let params = params(4, 2, WrappingIndent::None);
    let factory = MonospaceLineBreaksComputerFactory::default();
    let mut computer = factory.create_line_breaks_computer(params);
    computer.add_request(text, None, None);
    let previous = computer.finalize().pop().flatten().unwrap();

    computer.add_request(edited, None, Some(previous.clone()));
    let data = computer.finalize().pop().flatten().unwrap();
    assert_eq!(Some(data.clone()), fresh(edited, &params));
    assert_eq!(&data.break_offsets_visible_column[..5], &[2.0, 4.0, 6.0, 8.0, 10.0]);

    // Every recorded column is the true width of the text before the break.
    let chars: Vec<char> = edited.chars().collect();
    for (&offset, &column) in data.break_offsets.iter().zip(&data.break_offsets_visible_column) {
        let width = chars[..offset]
            .iter()
            .fold(0.0, |at, &ch| at + compute_char_width(ch, at, 4, 2.0));
        assert_eq!(column, width, "break at {offset}");
    }

    // Calling the scanner directly with the stale data is just as safe.
    assert_eq!(rewrap(previous, edited, &params), fresh(edited, &params));
}

#[test]
fn test_assembled_data_is_not_used_as_a_seed() {
    let text = "just some text and more";
    let narrow = params(4, 10, WrappingIndent::None);
    let wide = params(4, 15, WrappingIndent::None);
    let computed = fresh(text, &narrow).unwrap();
    // Same breaks, but with columns that do not belong to the text.
    let assembled = LineBreakData::new(
        Vec::new(),
        computed.break_offsets.clone(),
        vec![1.0, 2.0, 3.0],
        0,
    );

    assert_eq!(rewrap(assembled, text, &wide), fresh(text, &wide));
}
