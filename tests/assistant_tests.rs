// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashflow::assistant::{
    AddTransactionCall, Extraction, ExtractionService, parse_generate_response, system_prompt,
};
use cashflow::commands::assistant::ask;
use cashflow::models::{PaymentSource, TransactionKind, ValidationError};
use cashflow::utils::set_ai_active;
use cashflow::{db, store};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde_json::json;
use std::cell::RefCell;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

struct FakeService {
    answer: Extraction,
    prompts: RefCell<Vec<String>>,
}

impl ExtractionService for FakeService {
    fn extract(&self, system_prompt: &str, _message: &str) -> anyhow::Result<Extraction> {
        self.prompts.borrow_mut().push(system_prompt.to_string());
        Ok(self.answer.clone())
    }
}

fn lunch_call() -> AddTransactionCall {
    AddTransactionCall {
        content: "Lunch".into(),
        amount: 45_000.0,
        transaction_type: "Chi".into(),
        source: None,
        date: None,
    }
}

#[test]
fn response_with_text_and_function_call() {
    let body = json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [
                    { "text": "Got it, " },
                    { "functionCall": {
                        "name": "add_transaction",
                        "args": { "content": "Lunch", "amount": 45000, "transaction_type": "Chi" }
                    }},
                    { "text": "lunch recorded." }
                ]
            }
        }]
    });
    let ex = parse_generate_response(&body).unwrap();
    assert_eq!(ex.reply, "Got it, lunch recorded.");
    assert_eq!(ex.call, Some(lunch_call()));
}

#[test]
fn response_without_candidates_is_an_error() {
    let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
    let err = parse_generate_response(&body).unwrap_err();
    assert!(err.to_string().contains("SAFETY"));
}

#[test]
fn unknown_functions_are_ignored() {
    let body = json!({
        "candidates": [{ "content": { "parts": [
            { "functionCall": { "name": "delete_everything", "args": {} } },
            { "text": "Sorry, I can't do that." }
        ]}}]
    });
    let ex = parse_generate_response(&body).unwrap();
    assert!(ex.call.is_none());
    assert_eq!(ex.reply, "Sorry, I can't do that.");
}

#[test]
fn call_defaults_to_cash_and_today() {
    let new = lunch_call().into_new_transaction(today()).unwrap();
    assert_eq!(new.kind, TransactionKind::Expense);
    assert_eq!(new.source, PaymentSource::Cash);
    assert_eq!(new.date, today());
    assert_eq!(new.amount, 45_000);

    let explicit = AddTransactionCall {
        source: Some("Tài khoản".into()),
        date: Some("2025-06-01".into()),
        transaction_type: "INCOME".into(),
        ..lunch_call()
    }
    .into_new_transaction(today())
    .unwrap();
    assert_eq!(explicit.source, PaymentSource::Bank);
    assert_eq!(explicit.kind, TransactionKind::Income);
    assert_eq!(explicit.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
}

#[test]
fn call_validation_matches_manual_entry() {
    let frac = AddTransactionCall {
        amount: 12.5,
        ..lunch_call()
    };
    assert_eq!(
        frac.into_new_transaction(today()).unwrap_err(),
        ValidationError::InvalidAmount("12.5".into())
    );
    let huge = AddTransactionCall {
        amount: 1e20,
        ..lunch_call()
    };
    assert_eq!(
        huge.into_new_transaction(today()).unwrap_err(),
        ValidationError::InvalidAmount("100000000000000000000".into())
    );
    let negative = AddTransactionCall {
        amount: -3.0,
        ..lunch_call()
    };
    assert_eq!(
        negative.into_new_transaction(today()).unwrap_err(),
        ValidationError::NonPositiveAmount(-3)
    );
    let bad_date = AddTransactionCall {
        date: Some("15/06/2025".into()),
        ..lunch_call()
    };
    assert!(matches!(
        bad_date.into_new_transaction(today()),
        Err(ValidationError::InvalidDate(_))
    ));
}

#[test]
fn ask_records_extracted_transaction() {
    let conn = setup();
    store::save_settings(
        &conn,
        "default",
        &cashflow::models::Settings {
            initial_cash: 1_000_000,
            initial_bank: 0,
            daily_cost: 0,
        },
    )
    .unwrap();
    let service = FakeService {
        answer: Extraction {
            reply: "Recorded your lunch.".into(),
            call: Some(lunch_call()),
        },
        prompts: RefCell::new(Vec::new()),
    };

    let (reply, added) = ask(&conn, "default", &service, "lunch 45k", today()).unwrap();
    assert_eq!(reply, "Recorded your lunch.");
    let added = added.unwrap();
    assert_eq!(added.amount, 45_000);

    let rows = store::list_transactions(&conn, "default").unwrap();
    assert_eq!(rows, vec![added]);
    let prompts = service.prompts.borrow();
    assert!(prompts[0].contains("1.000.000"));
}

#[test]
fn ask_is_refused_while_disabled() {
    let conn = setup();
    set_ai_active(&conn, false).unwrap();
    let service = FakeService {
        answer: Extraction {
            reply: String::new(),
            call: Some(lunch_call()),
        },
        prompts: RefCell::new(Vec::new()),
    };
    let err = ask(&conn, "default", &service, "lunch", today()).unwrap_err();
    assert!(err.to_string().contains("disabled"));
    assert!(service.prompts.borrow().is_empty());
    assert!(store::list_transactions(&conn, "default").unwrap().is_empty());
}

#[test]
fn prompt_mentions_totals() {
    let snap = cashflow::models::FinancialSnapshot {
        total: 2_500_000,
        cumulative_saving: -40_000,
        ..Default::default()
    };
    let p = system_prompt(&snap);
    assert!(p.contains("2.500.000"));
    assert!(p.contains("-40.000"));
    assert!(p.contains("add_transaction"));
}
