//! One-shot handler invocations against the process environment.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use deploy_probe_api::v1::{
    ExecutionContext, HandlerRequest, HandlerResponse, HttpMethod, ResponseStatus,
};
use deploy_probe_infra::{run_dev_config_once, run_dev_health_once};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct ResponseDto {
    status: u16,
    headers: BTreeMap<&'static str, &'static str>,
    body: Value,
}

/// Run the config validator once.
pub fn run_dev_config(mode: OutputMode, method: &str) -> Result<CliOutput, CliError> {
    let request = HandlerRequest::with_method(HttpMethod::parse(method));
    render_response(mode, &run_dev_config_once(&request))
}

/// Run the health reporter once.
pub fn run_dev_health(
    mode: OutputMode,
    method: &str,
    client_context: Option<&str>,
) -> Result<CliOutput, CliError> {
    let request = HandlerRequest::with_method(HttpMethod::parse(method));
    let context = ExecutionContext::from_header(client_context);
    render_response(mode, &run_dev_health_once(&request, &context))
}

fn render_response(mode: OutputMode, response: &HandlerResponse) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        to_json_line(&response_dto(response))?
    } else if response.body.is_empty() {
        String::new()
    } else {
        format!("{}\n", response.body)
    };

    Ok(CliOutput {
        stdout,
        stderr: format!("status: {}\n", response.status.code()),
        exit_code: exit_code_for(response.status),
    })
}

fn response_dto(response: &HandlerResponse) -> ResponseDto {
    let body = if response.body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&response.body)
            .unwrap_or_else(|_| Value::String(response.body.clone()))
    };
    ResponseDto {
        status: response.status.code(),
        headers: response.headers.iter().copied().collect(),
        body,
    }
}

/// Client-side verdicts map to invalid input; faults are internal.
const fn exit_code_for(status: ResponseStatus) -> ExitCode {
    match status {
        ResponseStatus::Ok => ExitCode::Ok,
        ResponseStatus::BadRequest | ResponseStatus::Forbidden => ExitCode::InvalidInput,
        ResponseStatus::InternalServerError => ExitCode::Internal,
    }
}
