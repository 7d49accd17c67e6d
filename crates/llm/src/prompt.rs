/// The JSON shape the model is asked to return.
pub const RECEIPT_SCHEMA: &str = r#"{
  "store": "string",
  "date": "YYYY-MM-DD",
  "items": [
    {"name": "string", "quantity": number, "price": number}
  ],
  "total": number,
  "currency": "string"
}"#;

/// Single user-turn instruction embedding the OCR text and target schema.
pub fn build_prompt(ocr_text: &str) -> String {
    format!(
        "You are a receipt parser. Convert the following OCR text into structured JSON:\n\
         OCR Text: \"\"\"{ocr_text}\"\"\"\n\
         \n\
         Return ONLY valid JSON with these exact keys:\n\
         {RECEIPT_SCHEMA}"
    )
}
