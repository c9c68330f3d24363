use super::*;

#[test]
fn test_code_prompt() {
    assert_eq!(
        code_prompt("x = 1"),
        "Rewrite this code to avoid plagiarism but keep functionality:\n\nx = 1"
    );
}

#[test]
fn test_parse_paraphrases_strips_markers_and_blanks() {
    let reply = "1. The cat rested.\n\n2) \"A cat was sitting.\"\n- Feline seated.\n   ";
    assert_eq!(
        parse_paraphrases(reply),
        vec![
            "The cat rested.".to_string(),
            "A cat was sitting.".to_string(),
            "Feline seated.".to_string(),
        ]
    );
}

#[test]
fn test_parse_paraphrases_caps_count() {
    let reply = (0..25)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(parse_paraphrases(&reply).len(), MAX_PARAPHRASES);
}

#[test]
fn test_pick_paraphrase_skips_case_insensitive_echo() {
    let candidates = vec!["THE CAT SAT".to_string(), "A cat was seated".to_string()];
    assert_eq!(pick_paraphrase("the cat sat", &candidates), "A cat was seated");
}

#[test]
fn test_pick_paraphrase_falls_back_to_input() {
    assert_eq!(pick_paraphrase("the cat sat", &[]), "the cat sat");
    assert_eq!(
        pick_paraphrase("the cat sat", &["The Cat Sat".to_string()]),
        "the cat sat"
    );
}

#[tokio::test]
async fn test_rewrite_code_extracts_fenced_block() {
    let chat = Arc::new(MockChatCompletion::replying(
        "Sure, here it is:\n```python\ndef total(x, y):\n    return x + y\n```\nEnjoy.",
    ));
    let rewriter = Rewriter::new(chat.clone());

    let out = rewriter
        .rewrite_code("key", "def add(a,b):\n return a+b")
        .await
        .unwrap();
    assert_eq!(out, "def total(x, y):\n    return x + y");
    assert!(chat.prompts()[0].ends_with("def add(a,b):\n return a+b"));
}

#[tokio::test]
async fn test_rewrite_code_without_fence_returns_reply() {
    let rewriter = Rewriter::new(Arc::new(MockChatCompletion::replying("  plain reply  ")));
    assert_eq!(rewriter.rewrite_code("k", "x").await.unwrap(), "plain reply");
}

#[tokio::test]
async fn test_paraphrase_picks_first_different() {
    let rewriter = Rewriter::new(Arc::new(MockChatCompletion::replying(
        "1. the quick fox\n2. A fast fox jumps",
    )));
    assert_eq!(
        rewriter.paraphrase("k", "The quick fox").await.unwrap(),
        "A fast fox jumps"
    );
}

#[tokio::test]
async fn test_rewrite_propagates_upstream_failure() {
    let rewriter = Rewriter::new(Arc::new(MockChatCompletion::failing()));
    let err = rewriter.rewrite_code("k", "x").await.unwrap_err();
    assert!(matches!(err, RewriteError::Status { status: 401, .. }));
    assert!(err.details().is_some());
}

#[tokio::test]
async fn test_empty_reply_is_an_error() {
    let rewriter = Rewriter::new(Arc::new(MockChatCompletion::replying("")));
    assert!(matches!(
        rewriter.paraphrase("k", "x").await,
        Err(RewriteError::EmptyReply)
    ));
}
