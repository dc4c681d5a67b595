#![allow(dead_code)]

use filing_chunker::tokens::{TokenCodec, TokenizerError};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::TempDir;

pub fn bold_heading(text: &str) -> String {
    format!(
        r#"<div><span style="font-weight:700">{}</span></div>"#,
        text
    )
}

/// Synthetic iXBRL 10-K with a table-embedded ToC and six item headings.
pub fn sample_10k_html() -> String {
    format!(
        r#"<html xmlns:ix="http://www.xbrl.org/2013/inlineXBRL">
<head><title>test-20240928</title></head>
<body>
  <div style="display:none"><ix:header><ix:hidden>
    <ix:nonNumeric name="dei:EntityRegistrantName">Test Corp</ix:nonNumeric>
    <ix:nonNumeric name="dei:EntityCentralIndexKey">0001234567</ix:nonNumeric>
    <ix:nonNumeric name="dei:DocumentFiscalYearFocus">2024</ix:nonNumeric>
    <ix:nonNumeric name="dei:DocumentFiscalPeriodFocus">FY</ix:nonNumeric>
  </ix:hidden></ix:header></div>
  <div><table>
    <tr><td><span style="font-weight:700">Item 1. Business</span></td><td>3</td></tr>
    <tr><td><span style="font-weight:700">Item 7. Management's Discussion</span></td><td>20</td></tr>
  </table></div>
  {item1}
  <div>Test Corp designs widgets for industrial customers.</div>
  <div>Test Corp | 2024 Form 10-K | 4</div>
  {item1a}
  <div>Supply shortages could hurt widget production.</div>
  {item7}
  <div>Net sales increased eleven percent year over year.</div>
  <div><table><tr><td>Revenue</td><td>$100M</td></tr></table></div>
  {item7a}
  <div>Interest rate exposure is limited.</div>
  {item8}
  <div>Consolidated balance sheets follow.</div>
  <div>Table of Contents</div>
  <div>42</div>
  {item9}
  <div>No changes in or disagreements with accountants.</div>
</body></html>
"#,
        item1 = bold_heading("Item 1.\u{a0}\u{a0}Business"),
        item1a = bold_heading("Item 1A.\u{a0}\u{a0}Risk Factors"),
        item7 = bold_heading("Item 7.\u{a0}\u{a0}Management's Discussion"),
        item7a = bold_heading("Item 7A.\u{a0}\u{a0}Market Risk"),
        item8 = bold_heading("Item 8.\u{a0}\u{a0}Financial Statements"),
        item9 = bold_heading("Item 9.\u{a0}\u{a0}Changes in Accountants"),
    )
}

/// Keep the returned `TempDir` alive while the path is in use.
pub fn write_filing(contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aapl-20240928.htm");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

/// Whitespace tokenizer: one token per word, decoded with single spaces.
#[derive(Default)]
pub struct WordCodec {
    vocab: Mutex<(HashMap<String, u32>, Vec<String>)>,
}

impl TokenCodec for WordCodec {
    fn encode(&self, text: &str) -> Result<Vec<u32>, TokenizerError> {
        let mut guard = self.vocab.lock().unwrap();
        let (ids, words) = &mut *guard;
        Ok(text
            .split_whitespace()
            .map(|word| {
                *ids.entry(word.to_string()).or_insert_with(|| {
                    words.push(word.to_string());
                    (words.len() - 1) as u32
                })
            })
            .collect())
    }

    fn decode(&self, ids: &[u32]) -> Result<String, TokenizerError> {
        let guard = self.vocab.lock().unwrap();
        ids.iter()
            .map(|id| {
                guard
                    .1
                    .get(*id as usize)
                    .cloned()
                    .ok_or_else(|| TokenizerError(format!("unknown id {}", id)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|words| words.join(" "))
    }
}

/// WordLevel `tokenizer.json` whose vocabulary is `words(count)`.
pub fn word_level_tokenizer(count: usize) -> (TempDir, PathBuf) {
    let mut vocab = serde_json::Map::new();
    vocab.insert("[UNK]".to_string(), serde_json::json!(0));
    for i in 0..count {
        vocab.insert(format!("w{}", i), serde_json::json!(i + 1));
    }
    let tokenizer = serde_json::json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": { "type": "WordLevel", "vocab": vocab, "unk_token": "[UNK]" }
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokenizer.json");
    fs::write(&path, tokenizer.to_string()).unwrap();
    (dir, path)
}

/// `count` distinct words: `w0 w1 w2 ...`
pub fn words(count: usize) -> String {
    (0..count).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
}
