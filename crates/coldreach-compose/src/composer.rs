// SPDX-FileCopyrightText: 2026 Coldreach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly, reply parsing, and draft persistence.

use std::sync::Arc;

use coldreach_core::{ComposeError, Email, LlmProvider};
use coldreach_storage::database::Database;
use coldreach_storage::models::NewEmail;
use coldreach_storage::queries::{contacts, emails, research};
use comrak::{Options, markdown_to_html};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

const SYSTEM_PROMPT: &str = "You write short, personalized cold outreach emails. \
Reply with a single JSON object: {\"subject\": string, \"body\": string}. \
The body is plain text with paragraph breaks. No preamble, no markdown fences.";

/// The parsed shape of an LLM reply.
#[derive(Debug, Deserialize)]
struct GeneratedEmail {
    subject: String,
    body: String,
}

/// Generates draft emails from contact data, cached research, and the
/// user's product context.
pub struct EmailComposer {
    db: Arc<Database>,
    llm: Arc<dyn LlmProvider>,
}

impl EmailComposer {
    pub fn new(db: Arc<Database>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { db, llm }
    }

    /// Generate and persist a draft email for a contact.
    ///
    /// Product context is a hard precondition, checked before any LLM
    /// call. Cached company research is included in the prompt when the
    /// contact's domain has been enriched; its absence is not an error.
    pub async fn generate(
        &self,
        user_id: &str,
        contact_id: &str,
        product_context: &str,
    ) -> Result<Email, ComposeError> {
        let product_context = product_context.trim();
        if product_context.is_empty() {
            return Err(ComposeError::MissingProductContext);
        }

        let contact = contacts::get_contact_for_user(&self.db, user_id, contact_id)
            .await?
            .ok_or(ComposeError::ContactNotFound)?;

        let company = match &contact.company_domain {
            Some(domain) => research::get_by_domain(&self.db, domain).await?,
            None => None,
        };

        let mut prompt = String::new();
        prompt.push_str(&format!("Recipient: {}", contact.email));
        if let Some(name) = &contact.name {
            prompt.push_str(&format!(" ({name})"));
        }
        prompt.push('\n');
        if let Some(company) = &company {
            prompt.push_str(&format!(
                "Company: {} ({})\nIndustry: {}\nSize: {} employees\nLocation: {}\n",
                company.company_name,
                company.domain,
                company.industry,
                company.employee_range,
                company.location,
            ));
            if !company.description.is_empty() {
                prompt.push_str(&format!("About: {}\n", company.description));
            }
            if !company.tech_stack.is_empty() {
                prompt.push_str(&format!("Tech stack: {}\n", company.tech_stack.join(", ")));
            }
        }
        prompt.push_str(&format!("\nProduct being pitched:\n{product_context}\n"));

        debug!(
            contact_id,
            has_research = company.is_some(),
            provider = self.llm.name(),
            "requesting email generation"
        );
        let reply = self
            .llm
            .complete(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| ComposeError::Provider(e.to_string()))?;

        let generated = parse_reply(&reply)?;
        let body_html = markdown_to_html(&generated.body, &Options::default());

        let email = emails::create_email(
            &self.db,
            &NewEmail {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                contact_id: contact_id.to_string(),
                subject: generated.subject,
                body_text: generated.body,
                body_html: Some(body_html),
            },
        )
        .await?;

        info!(email_id = %email.id, contact_id, "draft email generated");
        Ok(email)
    }
}

/// Parse an LLM reply into subject and body.
///
/// Tolerates fenced code blocks and surrounding prose by extracting the
/// outermost `{...}` span before deserializing.
fn parse_reply(reply: &str) -> Result<GeneratedEmail, ComposeError> {
    let start = reply
        .find('{')
        .ok_or_else(|| ComposeError::InvalidReply("no JSON object in reply".into()))?;
    let end = reply
        .rfind('}')
        .ok_or_else(|| ComposeError::InvalidReply("unterminated JSON object".into()))?;
    if end < start {
        return Err(ComposeError::InvalidReply("malformed JSON object".into()));
    }

    let generated: GeneratedEmail = serde_json::from_str(&reply[start..=end])
        .map_err(|e| ComposeError::InvalidReply(e.to_string()))?;

    if generated.subject.trim().is_empty() || generated.body.trim().is_empty() {
        return Err(ComposeError::InvalidReply(
            "subject and body must be non-empty".into(),
        ));
    }
    Ok(generated)
}
