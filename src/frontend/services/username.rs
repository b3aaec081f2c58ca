//! Username validation, form state and the two store operations behind it.

use crate::backend::identity::AuthUser;
use crate::backend::store::{DocPath, DocumentStore, UserProfile, UsernameReservation, WriteBatch};
use crate::backend::utils::debounce::Debouncer;
use crate::utils::Result;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;

pub const MIN_USERNAME_LEN: usize = 3;

/// Length in UTF-16 code units, the unit the web client measured input in.
/// An emoji counts as two, so "a😀" is long enough to be matched and rejected.
fn input_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Quiet period before a typed username is checked remotely.
pub const CHECK_DELAY: Duration = Duration::from_millis(500);

static ALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._]{3,15}$").expect("valid username regex"));
static REPEATED_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._]{2}").expect("valid punctuation regex"));

/// 3 to 15 of `[a-z0-9._]`, no `.`/`_` pairs, not starting or ending with one.
pub fn is_valid_username(candidate: &str) -> bool {
    const PUNCTUATION: [char; 2] = ['.', '_'];

    ALLOWED.is_match(candidate)
        && !REPEATED_PUNCTUATION.is_match(candidate)
        && !candidate.starts_with(PUNCTUATION)
        && !candidate.ends_with(PUNCTUATION)
}

/// What the form shows under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameStatus {
    Checking,
    Available,
    Taken,
    Empty,
}

impl UsernameStatus {
    pub fn from_flags(text: &str, is_valid: bool, is_loading: bool) -> Self {
        if is_loading {
            Self::Checking
        } else if is_valid {
            Self::Available
        } else if !text.is_empty() {
            Self::Taken
        } else {
            Self::Empty
        }
    }

    pub fn message(self, username: &str) -> String {
        match self {
            Self::Checking => "Checking...".to_string(),
            Self::Available => format!("{username} is available!"),
            Self::Taken => "That username is taken!".to_string(),
            Self::Empty => String::new(),
        }
    }

    pub const fn class(self) -> &'static str {
        match self {
            Self::Available => "status-message text-success",
            Self::Taken => "status-message text-danger",
            Self::Checking | Self::Empty => "status-message",
        }
    }
}

/// Candidate text plus the validity and loading flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameDraft {
    text: String,
    is_valid: bool,
    is_loading: bool,
}

impl UsernameDraft {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn can_submit(&self) -> bool {
        self.is_valid
    }

    pub fn status(&self) -> UsernameStatus {
        UsernameStatus::from_flags(&self.text, self.is_valid, self.is_loading)
    }

    /// Applies a keystroke. Returns the stored text when the input was
    /// accepted, which is when a debounced check has to be scheduled.
    pub fn on_change(&mut self, input: &str) -> Option<String> {
        let value = input.to_lowercase();

        if input_len(&value) < MIN_USERNAME_LEN {
            self.text = value;
            self.is_loading = false;
            self.is_valid = false;
        } else if is_valid_username(&value) {
            self.text = value;
            self.is_loading = true;
            self.is_valid = false;
        } else {
            return None;
        }

        Some(self.text.clone())
    }

    /// Applies the result of the existence check made for `candidate`.
    /// Results for a text that is no longer current are dropped.
    pub fn apply_check(&mut self, candidate: &str, exists: bool) -> bool {
        if candidate != self.text {
            log::debug!("Dropping stale check for {candidate}");
            return false;
        }
        self.is_valid = !exists;
        self.is_loading = false;
        true
    }

    /// Clears loading after a failed check for the current text.
    pub fn abandon_check(&mut self, candidate: &str) {
        if candidate == self.text {
            self.is_loading = false;
        }
    }
}

/// Whether a reservation record exists for `username`.
pub async fn username_exists(store: &dyn DocumentStore, username: &str) -> Result<bool> {
    store.exists(&DocPath::username(username)).await
}

/// Waits out the debounce window, then checks `candidate` if it is still the
/// latest text and long enough. `None` when nothing was checked.
pub async fn debounced_check(
    debouncer: &Debouncer,
    store: &dyn DocumentStore,
    candidate: &str,
) -> Option<Result<bool>> {
    if !debouncer.settle().await || input_len(candidate) < MIN_USERNAME_LEN {
        return None;
    }
    log::debug!("Checking availability of {candidate}");
    Some(username_exists(store, candidate).await)
}

/// Writes the profile and the reservation in one atomic batch.
pub async fn claim_username(
    store: &dyn DocumentStore,
    user: &AuthUser,
    username: &str,
) -> Result<()> {
    let mut batch = WriteBatch::new();
    batch
        .set(
            DocPath::user(&user.uid),
            &UserProfile {
                username: username.to_string(),
                display_name: user.display_name.clone(),
                photo_url: user.photo_url.clone(),
            },
        )?
        .set(
            DocPath::username(username),
            &UsernameReservation {
                uid: user.uid.clone(),
            },
        )?;

    store.commit(batch).await?;
    log::info!("Claimed username {username} for {}", user.uid);
    Ok(())
}

/// Reads the username recorded in the user's profile, if any.
pub async fn load_username(store: &dyn DocumentStore, uid: &str) -> Result<Option<String>> {
    let profile = store.get(&DocPath::user(uid)).await?;
    Ok(profile
        .as_ref()
        .and_then(|doc| doc.get("username"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string))
}
