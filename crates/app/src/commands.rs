//! Terminal renderer: drives the page controllers and prints their state.

use anyhow::bail;
use catalogo_app::pages::create_file::CreateFilePage;
use catalogo_app::pages::create_identification::CreateIdentificationPage;
use catalogo_app::pages::create_tenant::CreateTenantPage;
use catalogo_app::pages::edit_file::EditFilePage;
use catalogo_app::pages::edit_identification::EditIdentificationPage;
use catalogo_app::pages::file_list::FileListPage;
use catalogo_app::pages::tenant_list::TenantListPage;
use catalogo_app::pages::{Delete, Submit};
use catalogo_app::{AppError, Navigation, Session};
use catalogo_core::table::{SearchField, NOT_AVAILABLE};
use catalogo_core::ErrorTree;

use crate::{Commands, FileCommand, IdentificationCommand, TenantCommand};

pub(crate) async fn run(command: Commands, session: Session, json: bool) -> anyhow::Result<()> {
    let out = Output { json };
    match command {
        Commands::Tenants { command } => tenants(command, session, out).await,
        Commands::Files { command } => files(command, session, out).await,
        Commands::Identifications { command } => identifications(command, session, out).await,
    }
}

#[derive(Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn errors(self, errors: &ErrorTree) {
        if self.json {
            match serde_json::to_string_pretty(errors) {
                Ok(text) => eprintln!("{text}"),
                Err(e) => eprintln!("{e}"),
            }
            return;
        }
        for (path, message) in errors.messages() {
            eprintln!("{path}: {message}");
        }
    }

    /// Report a navigation that leaves the page.
    fn navigation(self, nav: &Navigation) {
        if let Some(route) = nav.target() {
            println!("-> {route}");
        }
    }
}

fn apply(assignments: &[(String, String)], set: impl Fn(&str, &str) -> bool) -> anyhow::Result<()> {
    for (key, value) in assignments {
        if !set(key, value) {
            return Err(AppError::BadRequest(format!("Unknown or read-only field '{key}'")).into());
        }
    }
    Ok(())
}

fn submitted(outcome: Submit, errors: ErrorTree, out: Output) -> anyhow::Result<()> {
    match outcome {
        Submit::Done(nav) => {
            out.navigation(&nav);
            Ok(())
        }
        Submit::Failed => {
            out.errors(&errors);
            bail!("Nothing was saved")
        }
        Submit::Busy => bail!("Another save is still running"),
    }
}

fn deleted(outcome: Delete, error: Option<String>) -> anyhow::Result<()> {
    match outcome {
        Delete::Deleted => {
            println!("Eliminado.");
            Ok(())
        }
        Delete::Blocked(message) => bail!(message),
        Delete::Failed => bail!(error.unwrap_or_default()),
        Delete::Busy => bail!("Another delete is still running"),
    }
}

/// Stop when a page could not open.
fn opened(nav: Navigation, general: Option<String>) -> anyhow::Result<()> {
    match nav {
        Navigation::Stay => Ok(()),
        other => {
            if let Some(message) = general {
                eprintln!("{message}");
            }
            if let Some(route) = other.target() {
                eprintln!("-> {route}");
            }
            bail!("Page could not be opened")
        }
    }
}

async fn list_page(session: Session) -> anyhow::Result<FileListPage> {
    let page = FileListPage::new(session);
    if page.load().await != Navigation::Stay {
        bail!("No tenant selected; use --tenant or CATALOGO_TENANT");
    }
    if let Some(error) = page.error() {
        bail!(error);
    }
    Ok(page)
}

// --- Tenants ---

async fn tenants(command: TenantCommand, session: Session, out: Output) -> anyhow::Result<()> {
    match command {
        TenantCommand::List => {
            let page = TenantListPage::new(session);
            page.load().await;
            if let Some(error) = page.error() {
                bail!(error);
            }
            for tenant in page.tenants() {
                println!(
                    "{}\t{}\t{}\t{}",
                    tenant.id,
                    tenant.name,
                    tenant.isil,
                    if tenant.description.is_empty() {
                        NOT_AVAILABLE
                    } else {
                        tenant.description.as_str()
                    }
                );
            }
            Ok(())
        }
        TenantCommand::Create {
            name,
            isil,
            description,
        } => {
            let page = CreateTenantPage::new(session);
            page.set("name", &name);
            page.set("isil", &isil);
            page.set("description", &description);
            let outcome = page.submit().await;
            if let Some(message) = page.success() {
                println!("{message}");
            }
            submitted(outcome, page.errors(), out)
        }
    }
}

// --- Administrative files ---

async fn files(command: FileCommand, session: Session, out: Output) -> anyhow::Result<()> {
    match command {
        FileCommand::List { search, page } => {
            let list = list_page(session).await?;
            list.search_files(&search);
            for _ in 1..page {
                list.next_file_page();
            }
            println!("{}", list.title());
            list.with_files(|table| {
                for file in table.visible() {
                    println!(
                        "{}\t{}\t{}\t{}\t{}",
                        file.expediente,
                        file.unidad,
                        file.serie.as_deref().unwrap_or(NOT_AVAILABLE),
                        file.fecha_inicial.format("%d/%m/%Y"),
                        if file.peticion_transferencia { "Sí" } else { "No" },
                    );
                }
                println!("Página {} de {}", table.page(), table.page_count());
            });
            Ok(())
        }
        FileCommand::Show { case_number } => {
            let list = FileListPage::new(session);
            match list.file_details(case_number).await {
                Some(card) => {
                    print!("{card}");
                    Ok(())
                }
                None => bail!(list.error().unwrap_or_default()),
            }
        }
        FileCommand::Delete { case_number } => {
            let list = list_page(session).await?;
            let outcome = list.delete_file(case_number).await;
            deleted(outcome, list.error())
        }
        FileCommand::Create { set } => {
            let page = CreateFilePage::new(session, chrono::Local::now().date_naive());
            opened(page.open(), page.errors().general().map(str::to_string))?;
            apply(&set, |k, v| page.set(k, v))?;
            let outcome = page.submit().await;
            submitted(outcome, page.errors(), out)
        }
        FileCommand::Edit { case_number, set } => {
            let page = EditFilePage::new(session, case_number);
            opened(page.load().await, page.errors().general().map(str::to_string))?;
            apply(&set, |k, v| page.set(k, v))?;
            let outcome = page.submit().await;
            submitted(outcome, page.errors(), out)
        }
    }
}

// --- Identifications ---

async fn identifications(
    command: IdentificationCommand,
    session: Session,
    out: Output,
) -> anyhow::Result<()> {
    match command {
        IdentificationCommand::List { field, query, page } => {
            let Some(field) = SearchField::parse(&field) else {
                return Err(AppError::BadRequest(format!("Unknown search field '{field}'")).into());
            };
            let list = list_page(session).await?;
            list.search_identifications(field, &query);
            for _ in 1..page {
                list.next_identification_page();
            }
            println!("{}", list.title());
            list.with_identifications(|table| {
                for row in table.rows() {
                    println!(
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        row.expediente,
                        row.inventory,
                        row.object_name,
                        row.generic_classification,
                        row.author,
                        row.unit
                    );
                }
                println!("Página {} de {}", table.page(), table.page_count());
            });
            Ok(())
        }
        IdentificationCommand::Show { case_number } if out.json => {
            let page = EditIdentificationPage::new(session, case_number);
            opened(page.load().await, page.errors().general().map(str::to_string))?;
            if let Some(error) = page.errors().general() {
                bail!(error.to_string());
            }
            println!("{}", serde_json::to_string_pretty(&page.draft())?);
            Ok(())
        }
        IdentificationCommand::Show { case_number } => {
            let list = FileListPage::new(session);
            match list.identification_details(case_number).await {
                Some(card) => {
                    print!("{card}");
                    Ok(())
                }
                None => bail!(list.error().unwrap_or_default()),
            }
        }
        IdentificationCommand::Delete { case_number } => {
            let list = list_page(session).await?;
            let outcome = list.delete_identification(case_number).await;
            deleted(outcome, list.error())
        }
        IdentificationCommand::Create { case_number, set } => {
            let page = CreateIdentificationPage::new(session, Some(case_number));
            opened(page.open(), page.errors().general().map(str::to_string))?;
            apply(&set, |k, v| page.set(k, v))?;
            let outcome = page.submit().await;
            submitted(outcome, page.errors(), out)
        }
        IdentificationCommand::Edit { case_number, set } => {
            let page = EditIdentificationPage::new(session, case_number);
            opened(page.load().await, page.errors().general().map(str::to_string))?;
            if let Some(error) = page.errors().general() {
                bail!(error.to_string());
            }
            apply(&set, |k, v| page.set(k, v))?;
            let outcome = page.submit().await;
            submitted(outcome, page.errors(), out)
        }
    }
}
