// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Natural-language transaction entry through a hosted language model.
//!
//! The model is offered one function, `add_transaction`. Whatever it replies
//! is surfaced as text; a function call, if present, is turned into a
//! [`NewTransaction`] here, with the same validation as manual entry.

use crate::models::{
    FinancialSnapshot, MAX_AMOUNT, NewTransaction, PaymentSource, ValidationError,
};
use crate::utils::{fmt_money, http_client};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const ADD_TRANSACTION: &str = "add_transaction";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Arguments of an `add_transaction` function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddTransactionCall {
    pub content: String,
    pub amount: f64,
    pub transaction_type: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl AddTransactionCall {
    /// Missing source means cash, missing date means `today`.
    pub fn into_new_transaction(self, today: NaiveDate) -> Result<NewTransaction, ValidationError> {
        let kind = self.transaction_type.parse()?;
        let source = match self.source.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.parse()?,
            _ => PaymentSource::Cash,
        };
        let date = match self.date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidDate(d.to_string()))?,
            _ => today,
        };
        if !self.amount.is_finite()
            || self.amount.fract() != 0.0
            || self.amount.abs() > MAX_AMOUNT as f64
        {
            return Err(ValidationError::InvalidAmount(self.amount.to_string()));
        }
        let amount = self.amount as i64;
        let new = NewTransaction {
            date,
            content: self.content.trim().to_string(),
            kind,
            source,
            amount,
        };
        new.validate()?;
        Ok(new)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub reply: String,
    pub call: Option<AddTransactionCall>,
}

/// Something that reads a user message and may extract one transaction from it.
pub trait ExtractionService {
    fn extract(&self, system_prompt: &str, message: &str) -> Result<Extraction>;
}

pub fn system_prompt(stats: &FinancialSnapshot) -> String {
    format!(
        "You are FinAssist, a personal finance assistant.\n\
         Current data: total assets {total}.\n\
         Tasks:\n\
         1. Record income and expenses with the {func} function whenever the user gives the details.\n\
         2. Give saving advice based on the daily budget balance: {saving}.\n\
         3. Keep answers short and friendly.",
        total = fmt_money(stats.total),
        func = ADD_TRANSACTION,
        saving = fmt_money(stats.cumulative_saving),
    )
}

pub fn function_declaration() -> Value {
    json!({
        "name": ADD_TRANSACTION,
        "description": "Record one income or expense of the user.",
        "parameters": {
            "type": "OBJECT",
            "properties": {
                "content": { "type": "STRING", "description": "Label, e.g. Lunch, Salary" },
                "amount": { "type": "NUMBER", "description": "Amount in whole currency units" },
                "transaction_type": { "type": "STRING", "description": "\"INCOME\" or \"EXPENSE\"" },
                "source": { "type": "STRING", "description": "\"CASH\" or \"BANK\"" },
                "date": { "type": "STRING", "description": "Date (YYYY-MM-DD)" }
            },
            "required": ["content", "amount", "transaction_type"]
        }
    })
}

/// Collect reply text and the first `add_transaction` call from a
/// `generateContent` response body.
pub fn parse_generate_response(body: &Value) -> Result<Extraction> {
    let candidate = match body.get("candidates").and_then(|c| c.get(0)) {
        Some(c) => c,
        None => {
            let reason = body
                .pointer("/promptFeedback/blockReason")
                .and_then(Value::as_str)
                .unwrap_or("no candidates");
            bail!("Assistant returned no answer ({})", reason);
        }
    };
    let mut out = Extraction::default();
    let parts = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for part in parts {
        if let Some(text) = part.get("text").and_then(Value::as_str) {
            out.reply.push_str(text);
        }
        if let Some(fc) = part.get("functionCall") {
            let name = fc.get("name").and_then(Value::as_str).unwrap_or_default();
            if name != ADD_TRANSACTION {
                tracing::warn!(name, "ignoring unknown function call");
                continue;
            }
            if out.call.is_some() {
                tracing::warn!("ignoring additional {} call", ADD_TRANSACTION);
                continue;
            }
            let args = fc.get("args").cloned().unwrap_or(Value::Null);
            let call: AddTransactionCall = serde_json::from_value(args)
                .with_context(|| format!("Malformed {} arguments", ADD_TRANSACTION))?;
            out.call = Some(call);
        }
    }
    Ok(out)
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            api_key,
            model,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Reads `GEMINI_API_KEY`, `CASHFLOW_AI_MODEL` and `CASHFLOW_AI_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("GEMINI_API_KEY is not set"))?;
        let model = std::env::var("CASHFLOW_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let endpoint =
            std::env::var("CASHFLOW_AI_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        Self::new(api_key, model, endpoint)
    }
}

impl ExtractionService for GeminiClient {
    fn extract(&self, system_prompt: &str, message: &str) -> Result<Extraction> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let body = json!({
            "systemInstruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "role": "user", "parts": [{ "text": message }] }],
            "tools": [{ "functionDeclarations": [function_declaration()] }],
            "generationConfig": { "temperature": 0.7 }
        });
        tracing::debug!(model = %self.model, "sending assistant request");
        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .with_context(|| format!("Request to {}", self.endpoint))?
            .error_for_status()
            .context("Assistant request failed")?;
        let value: Value = resp.json().context("Assistant response is not JSON")?;
        parse_generate_response(&value)
    }
}
