//! Browse-session view model for the idiom editor.
//!
//! The session owns the client's transient copy of the catalogue: the idiom
//! list in fetch order, the category lists, the browse cursor, a busy flag
//! and the latest notice. Every change goes through an explicit action.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use idiom_catalog::{
    BrowseCursor, DEFAULT_SUGGESTION_LIMIT, Idiom, IdiomGroups, MajorType, MinorType,
    TypeCodeKind, generate_type_code, idiom_key, suggestions,
};
use tracing::{debug, warn};

use crate::api::{IdiomApi, NewMajorType, NewMinorType, TypeFilter};
use crate::error::ClientError;

/// Limit applied to write operations issued by the session.
pub const SAVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The last action succeeded.
    Success,
    /// The last action failed.
    Error,
}

/// Transient message for the user about the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,
    /// Text to display.
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Editor state with explicit load, navigation and save actions.
pub struct BrowseSession<A: ?Sized> {
    api: Arc<A>,
    idioms: Vec<Idiom>,
    cursor: BrowseCursor,
    major_types: Vec<MajorType>,
    minor_types: Vec<MinorType>,
    busy: bool,
    notice: Option<Notice>,
    save_timeout: Duration,
}

impl<A> BrowseSession<A>
where
    A: IdiomApi + ?Sized,
{
    /// Create an empty session; call [`Self::load`] to populate it.
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            idioms: Vec::new(),
            cursor: BrowseCursor::default(),
            major_types: Vec::new(),
            minor_types: Vec::new(),
            busy: false,
            notice: None,
            save_timeout: SAVE_TIMEOUT,
        }
    }

    /// Override the limit applied to write operations.
    #[must_use]
    pub fn with_save_timeout(mut self, timeout: Duration) -> Self {
        self.save_timeout = timeout;
        self
    }

    /// Fetch idioms and categories, positioning the cursor on the first
    /// idiom in browse order.
    ///
    /// # Errors
    ///
    /// Propagates the first failed fetch; the previous state is kept.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.fetch_all(None).await
    }

    /// Re-fetch everything, keeping the current idiom selected when it still
    /// exists.
    ///
    /// # Errors
    ///
    /// Propagates the first failed fetch; the previous state is kept.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let keep = self.current().map(|idiom| idiom.idiom.clone());
        self.fetch_all(keep).await
    }

    async fn fetch_all(&mut self, keep: Option<String>) -> Result<(), ClientError> {
        let fetched = async {
            let idioms = self.api.list_idioms().await?;
            let majors = self.api.list_major_types(TypeFilter::All).await?;
            let minors = self.api.list_minor_types(TypeFilter::All).await?;
            Ok::<_, ClientError>((idioms, majors, minors))
        }
        .await;
        match fetched {
            Ok((idioms, majors, minors)) => {
                debug!(
                    idioms = idioms.len(),
                    major_types = majors.len(),
                    minor_types = minors.len(),
                    "catalogue loaded"
                );
                self.idioms = idioms;
                self.major_types = majors;
                self.minor_types = minors;
                self.rebuild_cursor(keep.as_deref());
                Ok(())
            }
            Err(error) => {
                warn!(%error, "catalogue load failed");
                self.notice = Some(Notice::error(format!("加载失败: {error}")));
                Err(error)
            }
        }
    }

    fn rebuild_cursor(&mut self, keep: Option<&str>) {
        let groups = IdiomGroups::from_idioms(self.idioms.iter().cloned());
        self.cursor = BrowseCursor::from_groups(&groups);
        if let Some(name) = keep {
            self.cursor.select(name);
        }
    }

    /// Idioms in fetch order, including local edits.
    #[must_use]
    pub fn idioms(&self) -> &[Idiom] {
        &self.idioms
    }

    /// Current grouping of the idioms.
    #[must_use]
    pub fn groups(&self) -> IdiomGroups {
        IdiomGroups::from_idioms(self.idioms.iter().cloned())
    }

    /// Major categories as last fetched.
    #[must_use]
    pub fn major_types(&self) -> &[MajorType] {
        &self.major_types
    }

    /// Minor categories as last fetched.
    #[must_use]
    pub fn minor_types(&self) -> &[MinorType] {
        &self.minor_types
    }

    /// Minor categories belonging to `major_code`.
    pub fn minor_types_of<'a>(&'a self, major_code: &'a str) -> impl Iterator<Item = &'a MinorType> {
        self.minor_types
            .iter()
            .filter(move |minor| minor.major_type_code == major_code)
    }

    /// Idiom under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Idiom> {
        self.cursor.current()
    }

    /// Jump to an idiom by its text.
    pub fn select(&mut self, name: &str) -> Option<&Idiom> {
        self.cursor.select(name)
    }

    /// Step forward through the browse order, wrapping at the end.
    pub fn next_idiom(&mut self) -> Option<&Idiom> {
        self.cursor.next_idiom()
    }

    /// Step backward through the browse order, wrapping at the start.
    pub fn previous_idiom(&mut self) -> Option<&Idiom> {
        self.cursor.previous_idiom()
    }

    /// Search suggestions for the picker, in browse order.
    #[must_use]
    pub fn suggestions(&self, query: &str) -> Vec<&Idiom> {
        suggestions(self.cursor.order(), query, DEFAULT_SUGGESTION_LIMIT)
    }

    /// Whether a write operation is in flight.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Latest notice, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Clear the latest notice.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Save an idiom through the upsert endpoint and merge it locally under
    /// the normalised key the server stores it by.
    ///
    /// The request is abandoned after the save timeout; the server may still
    /// apply it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] for a blank idiom text,
    /// [`ClientError::Timeout`] when the limit elapses, or the API failure.
    pub async fn save_idiom(&mut self, idiom: Idiom) -> Result<(), ClientError> {
        if idiom.idiom.trim().is_empty() {
            let error = ClientError::invalid_request("idiom text must not be empty");
            self.notice = Some(Notice::error(error.to_string()));
            return Err(error);
        }
        let api = Arc::clone(&self.api);
        let outcome = self.guarded(api.update_idiom(&idiom)).await?;
        self.notice = Some(Notice::success(outcome.message));
        let key = idiom_key(&idiom.idiom);
        let saved = Idiom {
            idiom: key.clone(),
            ..idiom
        };
        match self
            .idioms
            .iter_mut()
            .find(|existing| idiom_key(&existing.idiom) == key)
        {
            Some(existing) => *existing = saved,
            None => self.idioms.push(saved),
        }
        self.rebuild_cursor(Some(&key));
        Ok(())
    }

    /// Create a major category whose code is generated from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TypeCode`] when no unique code can be derived,
    /// [`ClientError::Timeout`] when the limit elapses, or the API failure.
    pub async fn add_major_type(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<MajorType, ClientError> {
        let existing = self.major_types.iter().map(|major| major.type_code.as_str());
        let type_code = match generate_type_code(name, TypeCodeKind::Major, existing) {
            Ok(code) => code,
            Err(error) => return Err(self.fail(error.into())),
        };
        let request = NewMajorType {
            type_code,
            type_name: name.trim().to_owned(),
            description,
        };
        let api = Arc::clone(&self.api);
        let created = self.guarded(api.create_major_type(&request)).await?;
        self.notice = Some(Notice::success(format!("已添加大类 {}", created.type_name)));
        self.major_types.push(created.clone());
        Ok(created)
    }

    /// Create a minor category under `major_code` whose code is generated
    /// from `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRequest`] for an unknown parent,
    /// [`ClientError::TypeCode`] when no unique code can be derived,
    /// [`ClientError::Timeout`] when the limit elapses, or the API failure.
    pub async fn add_minor_type(
        &mut self,
        major_code: &str,
        name: &str,
        description: Option<String>,
    ) -> Result<MinorType, ClientError> {
        if !self
            .major_types
            .iter()
            .any(|major| major.type_code == major_code)
        {
            let error = ClientError::invalid_request(format!("unknown major type '{major_code}'"));
            return Err(self.fail(error));
        }
        let existing = self.minor_types.iter().map(|minor| minor.type_code.as_str());
        let type_code = match generate_type_code(name, TypeCodeKind::Minor, existing) {
            Ok(code) => code,
            Err(error) => return Err(self.fail(error.into())),
        };
        let request = NewMinorType {
            type_code,
            major_type_code: major_code.to_owned(),
            type_name: name.trim().to_owned(),
            description,
        };
        let api = Arc::clone(&self.api);
        let created = self.guarded(api.create_minor_type(&request)).await?;
        self.notice = Some(Notice::success(format!("已添加小类 {}", created.type_name)));
        self.minor_types.push(created.clone());
        Ok(created)
    }

    async fn guarded<T, F>(&mut self, operation: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        self.busy = true;
        let result = match tokio::time::timeout(self.save_timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout {
                seconds: self.save_timeout.as_secs(),
            }),
        };
        self.busy = false;
        result.map_err(|error| self.fail(error))
    }

    fn fail(&mut self, error: ClientError) -> ClientError {
        warn!(%error, "editor action failed");
        self.notice = Some(Notice::error(error.to_string()));
        error
    }
}
