use editor_core_wrap::{
    InjectedTextOptions, LineInjectedText, MonospaceLineBreaksComputerFactory, WrapLayout,
    WrappingIndent, WrappingOptions, WrappingParams,
};
use pretty_assertions::assert_eq;

fn layout(text: &str, column: usize) -> WrapLayout {
    WrapLayout::from_text(
        MonospaceLineBreaksComputerFactory::default(),
        WrappingParams::new(4, Some(column)).with_wrapping_indent(WrappingIndent::None),
        text,
    )
}

#[test]
fn test_reflow_on_wrapping_column_change() {
    let mut layout = layout("just some text and more\nshort", 10);
    assert_eq!(layout.visual_line_count(), 4);

    layout.set_wrapping_column(Some(15));
    let data = layout.line_break_data(0).unwrap();
    assert_eq!(data.break_offsets, vec![15, 23]);
    assert_eq!(data.break_offsets_visible_column, vec![15.0, 23.0]);
    assert_eq!(layout.visual_line_count(), 3);
    assert_eq!(layout.logical_position_to_visual(0, 16), Some((1, 1)));

    layout.set_wrapping_column(None);
    assert!(layout.line_break_data(0).is_none());
    assert_eq!(layout.visual_line_count(), 2);

    layout.set_wrapping_column(Some(10));
    assert_eq!(layout.line_break_data(0).unwrap().break_offsets, vec![10, 19, 23]);
    assert_eq!(layout.visual_line_count(), 4);
}

#[test]
fn test_line_edits() {
    let mut layout = layout("just some text and more\nshort", 10);

    layout.insert_line(0, "x");
    assert_eq!(layout.line_count(), 3);
    assert_eq!(layout.line_text(1).as_deref(), Some("just some text and more"));
    assert_eq!(layout.visual_line_count(), 5);

    layout.insert_line(99, "tail");
    assert_eq!(layout.line_count(), 4);
    assert_eq!(layout.line_text(3).as_deref(), Some("tail"));

    layout.delete_line(0);
    layout.delete_line(2);
    assert_eq!(layout.line_count(), 2);
    assert_eq!(layout.line_text(0).as_deref(), Some("just some text and more"));
    assert_eq!(layout.line_text(1).as_deref(), Some("short"));

    layout.replace_line(1, "aaaaaaaaaaaaaaa");
    assert_eq!(layout.line_break_data(1).unwrap().break_offsets, vec![10, 15]);
    assert_eq!(layout.visual_line_count(), 5);
    assert_eq!(layout.visual_to_logical_line(4), (1, 1));
}

#[test]
fn test_multi_line_edits_split_into_lines() {
    let mut layout = layout("a\nb", 10);
    layout.set_line_injected_text(1, vec![LineInjectedText::new(1, InjectedTextOptions::new("XY"))]);

    layout.replace_line(0, "x\n1234567890abcdef");
    assert_eq!(layout.line_count(), 3);
    assert_eq!(layout.line_text(0).as_deref(), Some("x"));
    assert_eq!(layout.line_text(1).as_deref(), Some("1234567890abcdef"));
    assert_eq!(layout.line_text(2).as_deref(), Some("b"));
    assert_eq!(layout.line_break_data(1).unwrap().break_offsets, vec![10, 16]);
    // The injection stays with "b".
    assert!(layout.line_break_data(2).unwrap().has_injected_text());
    assert_eq!(layout.visual_line_count(), 4);

    layout.insert_line(1, "p\nqqqqqqqqqqqq");
    assert_eq!(layout.line_count(), 5);
    assert_eq!(layout.line_text(1).as_deref(), Some("p"));
    assert_eq!(layout.line_text(2).as_deref(), Some("qqqqqqqqqqqq"));
    assert_eq!(layout.line_break_data(2).unwrap().break_offsets, vec![10, 12]);
    assert_eq!(layout.line_break_data(3).unwrap().break_offsets, vec![10, 16]);

    layout.insert_line(99, "y\nz");
    assert_eq!(layout.line_count(), 7);
    assert_eq!(layout.line_text(5).as_deref(), Some("y"));
    assert_eq!(layout.line_text(6).as_deref(), Some("z"));
    assert_eq!(layout.visual_line_count(), 9);
    assert_eq!(layout.visual_to_logical_line(8), (6, 0));
}

#[test]
fn test_deleting_the_only_line_clears_it() {
    let mut layout = layout("aaaaaaaaaaaaaaa", 10);
    assert_eq!(layout.visual_line_count(), 2);

    layout.delete_line(0);
    assert_eq!(layout.line_count(), 1);
    assert_eq!(layout.line_text(0).as_deref(), Some(""));
    assert_eq!(layout.visual_line_count(), 1);
}

#[test]
fn test_injected_text_positions() {
    let mut layout = layout("just some text and more\naaaaaaaaaaaaaaa", 10);
    layout.set_line_injected_text(
        1,
        vec![LineInjectedText::new(5, InjectedTextOptions::new("bbbbb"))],
    );

    let data = layout.line_break_data(1).unwrap();
    assert!(data.has_injected_text());
    assert_eq!(data.break_offsets, vec![10, 20]);

    assert_eq!(layout.logical_position_to_visual(1, 6), Some((4, 1)));
    assert_eq!(layout.visual_position_to_logical(4, 1), Some((1, 6)));

    // Column changes keep the injection and recompute from scratch.
    layout.set_wrapping_column(Some(40));
    let data = layout.line_break_data(1).unwrap();
    assert_eq!(data.break_offsets, vec![20]);
    assert_eq!(layout.visual_line_count(), 2);
}

#[test]
fn test_layout_from_options() {
    let options = WrappingOptions {
        wrapping_column: Some(10),
        wrapping_indent: WrappingIndent::None,
        ..WrappingOptions::default()
    };
    let params = options.params().unwrap();
    let layout = WrapLayout::from_text(
        MonospaceLineBreaksComputerFactory::from_options(&options),
        params,
        "just some text and more",
    );
    assert_eq!(layout.line_break_data(0).unwrap().break_offsets, vec![10, 19, 23]);
    assert_eq!(layout.params(), &params);
}
