use std::path::Path;

use panelmark::document::{Input, InputFormat, Mode, parse_input, parse_reply};
use panelmark::panel::{Panel, error_html};
use panelmark::render::{ListMode, RenderOptions};

#[test]
fn test_reply_fixture_renders_full_panel() {
    let reply = parse_reply(include_str!("fixtures/reply.json")).unwrap();
    assert_eq!(reply.mode(), Mode::Fast);

    let html = Panel::from_reply(&reply).to_html();
    let expected = concat!(
        "<div class=\"mode-indicator\">Mode: Fast</div>\n",
        "<div class=\"markdown-content\">",
        "<h2>Summary</h2><ul><li>first point</li><li>second point</li></ul><p>Plain closing line.</p>",
        "</div>\n",
        "<div class=\"sources\"><h4>Sources</h4><ol>",
        "<li><a href=\"https://example.com/a\" target=\"_blank\">https://example.com/a</a></li>",
        "<li><a href=\"https://example.com/b\" target=\"_blank\">Example B</a></li>",
        "</ol></div>",
    );
    assert_eq!(html, expected);
}

#[test]
fn test_auto_input_on_json_file_builds_reply() {
    let input = parse_input(
        include_str!("fixtures/reply.json"),
        InputFormat::Auto,
        Some(Path::new("tests/fixtures/reply.json")),
    )
    .unwrap();
    assert!(matches!(input, Input::Reply(_)));
}

#[test]
fn test_markdown_input_gets_unknown_mode_panel() {
    let input = parse_input("- a\n\n- b", InputFormat::Markdown, None).unwrap();
    let panel = Panel::from_reply(&input.into_reply())
        .with_options(RenderOptions::default().with_list_mode(ListMode::Merged));
    assert_eq!(panel.mode(), Mode::Unknown);
    assert!(panel.sources().is_empty());
    assert_eq!(
        panel.to_html(),
        "<div class=\"mode-indicator\">Mode: Unknown</div>\n<div class=\"markdown-content\"><ul><li>a</li><li>b</li></ul></div>"
    );
}

#[test]
fn test_structured_reply_shows_preformatted_json() {
    let reply = parse_reply(r#"{"response": [1, 2], "agent_type": "deep"}"#).unwrap();
    let html = Panel::from_reply(&reply).to_html();
    assert!(html.contains("Mode: Deep"));
    assert!(html.contains("<pre>[\n  1,\n  2\n]</pre>"));
}

#[test]
fn test_error_box_for_failed_payload() {
    let err = parse_reply("{\"agent_type\": \"fast\"}").unwrap_err();
    assert_eq!(
        error_html(&err.to_string()),
        "<p class=\"error\">payload is missing the `response` field</p>"
    );
}
