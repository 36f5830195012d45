//! Command implementations
//!
//! Each command writes its primary output to `out` so it can be captured in
//! tests; diagnostics go through `tracing`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use compliance_engine::{review_progress, ComplianceEngine};
use form_schema::{starter_schema, FormSchema, FORM_TEMPLATES};
use kyc_store::{
    AuthError, AuthService, ClientDirectory, InMemoryRepository, Invitation, InvitationRequest,
    Repository, SessionStore,
};
use shared_types::{AuditChain, Client, ComplianceItem, RiskLevel};
use template_engine::{
    bindings_from_json, get_template, humanize, list_templates, Bindings, TemplateDocument,
};

/// Where a template body comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Builtin(String),
    File(PathBuf),
}

/// Parse a `name=value` binding; the value may itself contain `=`
pub fn parse_binding(raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => bail!("expected NAME=VALUE, got '{}'", raw),
    }
}

/// Merge a JSON bindings file with `--bind` pairs; pairs win on conflict
pub fn collect_bindings(file: Option<&Path>, pairs: &[(String, String)]) -> Result<Bindings> {
    let mut bindings = match file {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading bindings from {}", path.display()))?;
            bindings_from_json(&raw)?
        }
        None => Bindings::new(),
    };
    bindings.extend(pairs.iter().cloned());
    Ok(bindings)
}

pub fn templates(out: &mut impl Write) -> Result<()> {
    for info in list_templates() {
        writeln!(out, "{} ({}) - {}", info.id, info.kind, info.name)?;
        writeln!(out, "    {}", info.description)?;
        if !info.variables.is_empty() {
            writeln!(out, "    variables: {}", info.variables.join(", "))?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Form templates:")?;
    for form in FORM_TEMPLATES {
        writeln!(out, "{} - {}", form.id, form.name)?;
    }
    Ok(())
}

pub fn variables(source: &Source, out: &mut impl Write) -> Result<()> {
    let names = match source {
        Source::Builtin(id) => get_template(id)?.variables(),
        Source::File(path) => load_document(path)?.variable_names().to_vec(),
    };
    for name in names {
        writeln!(out, "{}\t{}", name, humanize(&name))?;
    }
    Ok(())
}

/// Render a template and return the variables that were left unbound
pub fn render(source: &Source, bindings: &Bindings, out: &mut impl Write) -> Result<Vec<String>> {
    let unbound = match source {
        Source::Builtin(id) => {
            let rendered = get_template(id)?.render(bindings);
            if let Some(subject) = rendered.subject {
                writeln!(out, "Subject: {}", subject)?;
                writeln!(out)?;
            }
            write!(out, "{}", rendered.body)?;
            rendered.unbound
        }
        Source::File(path) => {
            let document = load_document(path)?;
            write!(out, "{}", document.render(bindings))?;
            document.unbound(bindings)
        }
    };

    if !unbound.is_empty() {
        tracing::warn!(unbound = %unbound.join(", "), "rendered with unbound variables");
    }
    Ok(unbound)
}

/// Print validation problems; returns how many were found
pub fn validate_form(path: &Path, out: &mut impl Write) -> Result<usize> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading form schema from {}", path.display()))?;
    let schema: FormSchema = serde_json::from_str(&raw)
        .with_context(|| format!("parsing form schema from {}", path.display()))?;

    let errors = schema.validate();
    if errors.is_empty() {
        writeln!(
            out,
            "{} fields, {} required: ok",
            schema.len(),
            schema.required_count()
        )?;
    }
    for error in &errors {
        writeln!(out, "{}", error)?;
    }
    Ok(errors.len())
}

pub fn new_form(template_id: &str, out: &mut impl Write) -> Result<()> {
    let schema = starter_schema(template_id)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}

pub fn compliance(path: &Path, as_of: Option<NaiveDate>, out: &mut impl Write) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading compliance items from {}", path.display()))?;
    let items: Vec<ComplianceItem> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing compliance items from {}", path.display()))?;

    let engine = as_of.map(ComplianceEngine::as_of).unwrap_or_default();
    let report = engine.report(&items);
    let s = &report.summary;

    writeln!(out, "As of {}", report.as_of)?;
    writeln!(
        out,
        "Total {}  pending {}  in review {}  approved {}  rejected {}  expired {}",
        s.total, s.pending, s.in_review, s.approved, s.rejected, s.expired
    )?;
    writeln!(
        out,
        "High risk {}  overdue {}  compliance rate {}%",
        s.high_risk, s.overdue, s.compliance_rate
    )?;
    writeln!(
        out,
        "Risk: low {}  medium {}  high {}",
        report.risk.low, report.risk.medium, report.risk.high
    )?;

    if !report.attention.is_empty() {
        writeln!(out, "Needs attention:")?;
        for id in &report.attention {
            if let Some(item) = items.iter().find(|i| &i.id == id) {
                writeln!(
                    out,
                    "  {} {} {} [{}] due {} ({}%)",
                    item.id,
                    item.client,
                    item.kind,
                    item.risk_level,
                    item.due_date,
                    review_progress(item.status)
                )?;
            }
        }
    }
    Ok(())
}

pub fn login<S: SessionStore>(
    auth: &mut AuthService<S>,
    email: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    let user = auth.login(email, password)?;
    writeln!(out, "Signed in as {} <{}>", user.name, user.email)?;
    Ok(())
}

pub fn logout<S: SessionStore>(auth: &mut AuthService<S>, out: &mut impl Write) -> Result<()> {
    auth.logout()?;
    writeln!(out, "Signed out")?;
    Ok(())
}

pub fn whoami<S: SessionStore>(auth: &AuthService<S>, out: &mut impl Write) -> Result<()> {
    match auth.current_user() {
        Some(user) => writeln!(
            out,
            "{} <{}> ({}, {})",
            user.name, user.email, user.role, user.org_id
        )?,
        None => writeln!(out, "Not signed in")?,
    }
    Ok(())
}

pub fn parse_risk(raw: &str) -> Result<RiskLevel> {
    match raw.to_lowercase().as_str() {
        "low" => Ok(RiskLevel::Low),
        "medium" => Ok(RiskLevel::Medium),
        "high" => Ok(RiskLevel::High),
        _ => bail!("risk level must be low, medium or high, got '{}'", raw),
    }
}

/// Print clients from a JSON array whose company, contact or email match `query`
pub fn search_clients(path: &Path, query: &str, out: &mut impl Write) -> Result<usize> {
    let clients = load_clients(path)?;
    let found = kyc_store::search_clients(&clients, query);
    for client in &found {
        writeln!(
            out,
            "{}\t{}\t{} <{}>\t{} [{}]",
            client.id, client.company, client.contact_name, client.email, client.status, client.risk_score
        )?;
    }
    Ok(found.len())
}

/// Invite a client into the signed-in user's organisation.
///
/// With `clients_path` the client list is read from and written back to
/// that JSON file.
pub fn invite<S: SessionStore>(
    auth: &AuthService<S>,
    clients_path: Option<&Path>,
    base_url: &str,
    request: &InvitationRequest,
    out: &mut impl Write,
) -> Result<Invitation> {
    let user = auth.current_user().ok_or(AuthError::NotLoggedIn)?;
    let existing = match clients_path {
        Some(path) if path.exists() => load_clients(path)?,
        _ => Vec::new(),
    };

    let directory = ClientDirectory::new(
        InMemoryRepository::with_records(existing),
        user.org_id.clone(),
        base_url,
    );
    let (client, invitation) = directory.invite(request)?;

    if let Some(path) = clients_path {
        let all = directory.repository().list()?;
        std::fs::write(path, serde_json::to_string_pretty(&all)?)
            .with_context(|| format!("writing clients to {}", path.display()))?;
    }

    writeln!(out, "Invited {} <{}>", client.company, client.email)?;
    writeln!(out, "Link: {}", invitation.link)?;
    writeln!(out, "Expires: {}", invitation.expires_at)?;
    Ok(invitation)
}

fn load_clients(path: &Path) -> Result<Vec<Client>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading clients from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing clients from {}", path.display()))
}

/// Print the audit log, oldest first, after checking its hash links
pub fn audit(chain: &AuditChain, out: &mut impl Write) -> Result<()> {
    chain.verify()?;
    if chain.events.is_empty() {
        writeln!(out, "No audit events")?;
        return Ok(());
    }
    for line in chain.summary() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "{} events, chain verified", chain.events.len())?;
    Ok(())
}

fn load_document(path: &Path) -> Result<TemplateDocument> {
    TemplateDocument::from_file(path)
        .with_context(|| format!("reading template from {}", path.display()))
}
