use styledown::{Config, ElementKind, MAX_BULLET_DEPTH, markdown_to_typst, parse, render};

const MARKERS: usize = 100_000;

#[test]
fn hundred_thousand_nested_bullets() {
    let input = "* ".repeat(MARKERS) + "end\n";
    let parsed = parse(&input);

    assert_eq!(parsed.elements().len(), 1);
    assert_eq!(parsed.elements()[0].depth(), MAX_BULLET_DEPTH);
    assert_eq!(parsed.to_source(), input);

    let styled = render(&parsed, &Config::compiled_default());
    assert_eq!(styled.text(), parsed.plain_text());
    assert_eq!(styled.spans().len(), MAX_BULLET_DEPTH);

    let typst = markdown_to_typst(&input);
    assert_eq!(typst.matches("#list(").count(), MAX_BULLET_DEPTH);
    assert!(typst.contains("end"));
}

#[test]
fn nested_bullets_store_input_once() {
    let input = "+ ".repeat(MARKERS) + "`x`\n";
    let parsed = parse(&input);

    // Bullets hold no text of their own; only leaves carry bytes.
    let stored: usize = parsed.leaves().map(|leaf| leaf.text().len()).sum();
    assert!(stored <= input.len());
    assert_eq!(parsed.leaves().count(), 3);

    let kinds: Vec<_> = parsed.leaves().map(|leaf| leaf.kind()).collect();
    assert_eq!(
        kinds,
        vec![ElementKind::Text, ElementKind::CodeBlock, ElementKind::Text]
    );
}
