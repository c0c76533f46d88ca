//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有される抽出指示:
//! - EXTRACTION_PROMPT: 住所抽出の指示文
//! - response_schema: 構造化出力のスキーマ

use serde_json::{json, Value};

/// 1行あたりの必須キー
pub const ADDRESS_FIELDS: &[&str] = &["plz", "street", "houseNumbers", "city"];

/// 住所抽出プロンプト
///
/// 入力は表形式の「Begehungsplan」（点検計画書）。タイトル・ヘッダ情報・列見出しは無視し、
/// ドイツ語の特殊文字を保持させる。
pub const EXTRACTION_PROMPT: &str = r#"You are an expert OCR and data extraction tool specializing in German administrative documents.
Analyze the provided image, which is a "Begehungsplan" (inspection plan), and extract all address rows into a structured JSON array.

Each object in the array must represent a single row from the document's table and have the following keys:
- "plz": The postal code from the 'PLZ' column. This should be a string.
- "street": The street name from the 'Straße, Platz usw.' column.
- "houseNumbers": A single string containing all house numbers and identifiers from the 'HNr' column for that row.
- "city": The city or locality from the 'Ort' column.

Rules:
1. Accurately transcribe all data, paying close attention to special German characters (e.g., ä, ö, ü, ß).
2. Ignore the document's main title, header metadata (like NL, ZSPL, Datum, etc.), and the table column headers.
3. Ensure the output is only the raw JSON array. Do not include any explanatory text, markdown formatting like ```json, or any other content outside of the JSON structure."#;

/// 構造化出力スキーマ（文字列4項目・全必須のオブジェクト配列）
pub fn response_schema() -> Value {
    let properties: serde_json::Map<String, Value> = ADDRESS_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": ADDRESS_FIELDS,
        }
    })
}
