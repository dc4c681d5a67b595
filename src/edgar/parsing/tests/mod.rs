use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn bold_heading(text: &str) -> String {
    format!(
        r#"<div style="padding-left:45pt;text-indent:-45pt"><span style="font-weight:700">{}</span></div>"#,
        text
    )
}

/// Synthetic iXBRL 10-K: two ToC rows in tables, six real headings.
pub fn minimal_10k_html() -> String {
    format!(
        r##"<?xml version='1.0'?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:ix="http://www.xbrl.org/2013/inlineXBRL">
<head><title>test-20240928</title></head>
<body>
  <div style="display:none"><ix:header><ix:hidden>
    <ix:nonNumeric name="dei:EntityRegistrantName">Test Corp</ix:nonNumeric>
    <ix:nonNumeric name="dei:EntityCentralIndexKey">0001234567</ix:nonNumeric>
    <ix:nonNumeric name="dei:DocumentFiscalYearFocus">2024</ix:nonNumeric>
    <ix:nonNumeric name="dei:DocumentFiscalPeriodFocus">FY</ix:nonNumeric>
  </ix:hidden></ix:header></div>
  <div><table><tr><td><span style="font-weight:700"><a href="#s1">Item 1. Business</a></span></td></tr></table></div>
  <div><table><tr><td><span style="font-weight:700"><a href="#s7">Item 7. MD&amp;A</a></span></td></tr></table></div>
  <div><span style="font-weight:700">PART I</span></div>
  {item1}
  <div>This is the business section content for Test Corp.</div>
  <div>It describes the company operations.</div>
  <div>Test Corp | 2024 Form 10-K | 1</div>
  {item1a}
  <div>Risk factor content here.</div>
  <div>The company faces various risks.</div>
  {item7}
  <div>Management discussion content.</div>
  <div><table><tr><td>Revenue</td><td>$100M</td></tr></table></div>
  <div>Test Corp | 2024 Form 10-K | 5</div>
  {item7a}
  <div>Market risk disclosures here.</div>
  {item8}
  <div>Financial statements and supplementary data.</div>
  <div>Table of Contents</div>
  <div>42</div>
  {item9}
  <div>Not a target section content.</div>
</body></html>
"##,
        item1 = bold_heading("Item 1.\u{a0}\u{a0}Business"),
        item1a = bold_heading("Item 1A.\u{a0}\u{a0}Risk Factors"),
        item7 = bold_heading("Item 7.\u{a0}\u{a0}MD&amp;A"),
        item7a = bold_heading("Item 7A.\u{a0}\u{a0}Market Risk"),
        item8 = bold_heading("Item 8.\u{a0}\u{a0}Financial Statements"),
        item9 = bold_heading("Item 9.\u{a0}\u{a0}Changes in Accountants"),
    )
}

/// Writes `contents` to `filing.html` in a fresh temp dir.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn write_temp_filing(contents: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filing.html");
    fs::write(&path, contents).unwrap();
    (dir, path)
}
