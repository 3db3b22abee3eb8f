//! Command execution against the persisted workbench.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use khabari_application::ports::{BodyFormatter, Clock, Dispatcher, StateSink};
use khabari_application::{Action, ExportResponse, FormatBody, SendRequest, WorkbenchStore};
use khabari_domain::{Workbench, generate_id};
use khabari_infrastructure::FileExportWriter;
use tokio::sync::Mutex;

use crate::cli::{AuthCommand, CollectionCommand, Command, HeaderCommand, ParamCommand};
use crate::error::{AppError, AppResult};
use crate::render;

/// Runs commands against one store.
pub struct App<S: StateSink, D: Dispatcher, F: BodyFormatter> {
    store: Mutex<WorkbenchStore<S>>,
    send: SendRequest<D>,
    format: FormatBody<F>,
    clock: Arc<dyn Clock>,
    export_dir: PathBuf,
}

impl<S: StateSink, D: Dispatcher, F: BodyFormatter> App<S, D, F> {
    /// Wires the use cases around `store`.
    pub fn new(
        store: WorkbenchStore<S>,
        dispatcher: Arc<D>,
        formatter: F,
        clock: Arc<dyn Clock>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            send: SendRequest::new(dispatcher),
            format: FormatBody::new(formatter),
            clock,
            export_dir,
        }
    }

    /// Executes one command, writing its output to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error when the command is rejected (unknown tab, last
    /// tab, blank name, bad index), when nothing is there to show, or when
    /// persistence or output fails.
    pub async fn execute(&self, command: Command, out: &mut impl Write) -> AppResult<()> {
        match command {
            Command::Tabs => {
                let store = self.store.lock().await;
                write!(out, "{}", render::tabs(store.state()))?;
            }
            Command::NewTab => {
                self.apply(Action::add_tab(), "could not open a tab").await?;
                let store = self.store.lock().await;
                write!(out, "{}", render::tabs(store.state()))?;
            }
            Command::Close { tab } => {
                let id = self.resolve_tab(&tab).await?;
                self.apply(Action::RemoveTab { id }, "cannot close the last tab")
                    .await?;
                let store = self.store.lock().await;
                write!(out, "{}", render::tabs(store.state()))?;
            }
            Command::Switch { tab } => {
                let id = self.resolve_tab(&tab).await?;
                self.apply(Action::SetActiveTab { id }, "unknown tab").await?;
                self.show_active(out).await?;
            }
            Command::Rename { name, tab } => {
                let id = match tab {
                    Some(tab) => self.resolve_tab(&tab).await?,
                    None => self.active_id().await,
                };
                self.apply(Action::RenameTab { id, name }, "name must not be blank")
                    .await?;
            }
            Command::Section { section } => {
                self.apply(Action::SetActiveSection(section), "unknown section")
                    .await?;
                self.show_active(out).await?;
            }
            Command::Url { url } => {
                let id = self.active_id().await;
                self.apply(Action::EditUrl { id, url }, "unknown tab").await?;
                self.show_active(out).await?;
            }
            Command::Method { method } => {
                let id = self.active_id().await;
                self.apply(Action::SetMethod { id, method }, "unknown tab")
                    .await?;
                self.show_active(out).await?;
            }
            Command::Param(param) => {
                let id = self.active_id().await;
                let (action, rejection) = match param {
                    ParamCommand::Set {
                        index,
                        key,
                        value,
                        disabled,
                    } => (
                        Action::SetParam {
                            id,
                            index,
                            key,
                            value,
                            enabled: !disabled,
                        },
                        "index is past the end of the param list",
                    ),
                    ParamCommand::Toggle { index } => {
                        (Action::ToggleParam { id, index }, "no param at that index")
                    }
                    ParamCommand::Rm { index } => {
                        (Action::RemoveParam { id, index }, "no param at that index")
                    }
                };
                self.apply(action, rejection).await?;
                self.show_active(out).await?;
            }
            Command::Header(header) => {
                let id = self.active_id().await;
                let (action, rejection) = match header {
                    HeaderCommand::Set { name, value } => (
                        Action::SetHeader { id, name, value },
                        "header name must not be blank",
                    ),
                    HeaderCommand::Rm { name } => {
                        (Action::RemoveHeader { id, name }, "no such header")
                    }
                };
                self.apply(action, rejection).await?;
                self.show_active(out).await?;
            }
            Command::Body { text } => {
                let id = self.active_id().await;
                self.apply(Action::SetBody { id, body: text }, "unknown tab")
                    .await?;
                self.show_active(out).await?;
            }
            Command::Format => {
                let changed = {
                    let mut store = self.store.lock().await;
                    self.format.execute(&mut store).await?
                };
                if !changed {
                    writeln!(out, "body left unchanged")?;
                }
                self.show_active(out).await?;
            }
            Command::Auth(auth) => {
                let id = self.active_id().await;
                let action = match auth {
                    AuthCommand::Type { kind } => Action::SetAuthType { id, kind },
                    AuthCommand::Set { key, value } => Action::SetAuthField { id, key, value },
                };
                self.apply(action, "unknown tab").await?;
                self.show_active(out).await?;
            }
            Command::Send { view } => match self.send.run(&self.store).await? {
                Some(record) => write!(out, "{}", render::response(&record, view))?,
                None => writeln!(out, "response discarded")?,
            },
            Command::Show { view } => {
                let store = self.store.lock().await;
                let record = store
                    .state()
                    .response()
                    .ok_or_else(|| AppError::Nothing("no response for this tab".into()))?;
                write!(out, "{}", render::response(record, view))?;
            }
            Command::Export { view, dir } => {
                let writer = FileExportWriter::new(dir.unwrap_or_else(|| self.export_dir.clone()));
                let use_case = ExportResponse::new(Arc::new(writer), Arc::clone(&self.clock));
                let store = self.store.lock().await;
                let path = use_case.execute(store.state(), view).await?;
                writeln!(out, "{}", path.display())?;
            }
            Command::History { limit, clear } => {
                if clear {
                    let mut store = self.store.lock().await;
                    store.dispatch(Action::ClearHistory).await?;
                    writeln!(out, "history cleared")?;
                } else {
                    let store = self.store.lock().await;
                    let text = render::history(store.state().history(), limit, self.clock.now());
                    write!(out, "{text}")?;
                }
            }
            Command::Collection(collection) => self.collection(collection, out).await?,
        }
        Ok(())
    }

    async fn collection(&self, command: CollectionCommand, out: &mut impl Write) -> AppResult<()> {
        match command {
            CollectionCommand::Add { name, parent } => {
                let id = generate_id();
                let action = Action::AddCollection {
                    id: id.clone(),
                    name,
                    parent_id: parent,
                };
                self.apply(action, "name must not be blank and parent must exist")
                    .await?;
                writeln!(out, "{id}")?;
            }
            CollectionCommand::Rename { id, name } => {
                self.apply(
                    Action::RenameCollection { id, name },
                    "unknown node or blank name",
                )
                .await?;
            }
            CollectionCommand::Rm { id } => {
                self.apply(Action::DeleteCollection { id }, "unknown node")
                    .await?;
            }
            CollectionCommand::Search { query } => {
                let store = self.store.lock().await;
                let found = store.state().search_collections(&query);
                write!(out, "{}", render::tree(&found))?;
            }
            CollectionCommand::Tree => {
                let store = self.store.lock().await;
                write!(out, "{}", render::tree(store.state().collections().roots()))?;
            }
        }
        Ok(())
    }

    /// Dispatches `action`, turning a rejection into an error.
    async fn apply(&self, action: Action, rejection: &str) -> AppResult<()> {
        let accepted = self.store.lock().await.dispatch(action).await?;
        if accepted {
            Ok(())
        } else {
            Err(AppError::Rejected(rejection.to_string()))
        }
    }

    async fn active_id(&self) -> String {
        self.store.lock().await.state().session().active_id().to_string()
    }

    /// Accepts a 1-based tab position or a tab id.
    async fn resolve_tab(&self, reference: &str) -> AppResult<String> {
        let store = self.store.lock().await;
        let tabs = store.state().session().tabs();
        let by_position = reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| tabs.get(i));
        by_position
            .or_else(|| tabs.iter().find(|t| t.id == reference))
            .map(|t| t.id.clone())
            .ok_or_else(|| AppError::UnknownTab(reference.to_string()))
    }

    async fn show_active(&self, out: &mut impl Write) -> AppResult<()> {
        let store = self.store.lock().await;
        let state: &Workbench = store.state();
        if let Some(tab) = state.active_tab() {
            write!(
                out,
                "{}",
                render::request(tab, state.session().active_section())
            )?;
        }
        Ok(())
    }

    /// Current state, for inspection after a command.
    pub async fn snapshot(&self) -> Workbench {
        self.store.lock().await.state().clone()
    }
}
