//! Profile flow: login gate, DNI validator, and avatar management.

use std::io::Read;
use std::rc::Rc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use tienda_core::{Dni, DniError};

use crate::flows::AuthFlow;
use crate::storage::{Storage, StorageError, keys};
use crate::stores::SessionStore;
use crate::views::{DniFeedback, ProfilePort};

/// Label shown when the session has no email to display.
const MISSING_EMAIL_LABEL: &str = "Email no encontrado";

/// Errors from the profile flow.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The selected file is not an image content type.
    #[error("selected file is not an image")]
    NotAnImage,

    /// The image exceeds the configured size cap.
    #[error("image exceeds the {max_bytes} byte limit")]
    TooLarge {
        /// The configured cap.
        max_bytes: usize,
    },

    /// The selected file could not be read.
    #[error("could not read the selected file: {0}")]
    Unreadable(#[from] std::io::Error),

    /// The encoded avatar could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A user-chosen file for the avatar: its declared content type and bytes.
///
/// Reading the file is the one asynchronous boundary in the original page;
/// here the read completes before the flow sees the upload, so a second
/// selection simply supersedes the first.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// MIME content type as declared by the picker (e.g. `image/png`).
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    /// Drain a reader into an upload.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the reader fails part-way.
    pub fn read(
        mut reader: impl Read,
        content_type: impl Into<String>,
    ) -> std::io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self {
            content_type: content_type.into(),
            bytes,
        })
    }

    /// Whether the declared content type is an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Encode as a `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

/// Profile page controller, gated on a logged-in session.
pub struct ProfileFlow {
    session: SessionStore,
    storage: Storage,
    auth: Rc<AuthFlow>,
    port: Option<Rc<dyn ProfilePort>>,
    max_avatar_bytes: usize,
}

impl ProfileFlow {
    /// Create the flow.
    #[must_use]
    pub fn new(
        session: SessionStore,
        storage: Storage,
        auth: Rc<AuthFlow>,
        port: Option<Rc<dyn ProfilePort>>,
        max_avatar_bytes: usize,
    ) -> Self {
        Self {
            session,
            storage,
            auth,
            port,
            max_avatar_bytes,
        }
    }

    /// Run the login gate and populate the panel.
    ///
    /// Not logged in: fire the redirect and populate nothing. The profile
    /// container itself is required; without a port the page cannot proceed.
    ///
    /// Returns whether the panel was populated.
    pub fn open(&self) -> bool {
        let Some(port) = &self.port else {
            tracing::error!("profile container missing, cannot show profile");
            return false;
        };

        if !self.session.is_logged_in() {
            tracing::warn!("not logged in, leaving profile page");
            port.redirect_to_home();
            return false;
        }

        let email = self.session.email();
        port.show_email(email.as_deref().unwrap_or(MISSING_EMAIL_LABEL));

        if let Some(data_url) = self.storage.durable().get(keys::PROFILE_PIC) {
            port.show_avatar(&data_url);
        }
        true
    }

    /// Validate a DNI and surface the outcome.
    ///
    /// Returns the feedback for callers that want it; the port shows it
    /// either way.
    pub fn validate_dni(&self, input: &str) -> DniFeedback {
        let feedback = dni_feedback(input);
        if let Some(port) = &self.port {
            port.show_dni_feedback(&feedback);
        }
        feedback
    }

    /// Replace the persisted avatar with an uploaded image.
    ///
    /// Non-image selections, oversized files, and failed saves surface a
    /// user-visible warning and leave the previous avatar in place. On
    /// success the new data URL is persisted and displayed immediately.
    ///
    /// # Errors
    ///
    /// Returns the corresponding [`ProfileError`]; the user-facing warning
    /// has already been shown.
    pub fn update_avatar(&self, upload: &AvatarUpload) -> Result<String, ProfileError> {
        if !upload.is_image() {
            self.warn("Por favor, selecciona un archivo de imagen válido.");
            return Err(ProfileError::NotAnImage);
        }
        if upload.bytes.len() > self.max_avatar_bytes {
            self.warn("La imagen seleccionada es demasiado grande.");
            return Err(ProfileError::TooLarge {
                max_bytes: self.max_avatar_bytes,
            });
        }

        let data_url = upload.to_data_url();
        if let Err(e) = self.storage.durable().set(keys::PROFILE_PIC, &data_url) {
            tracing::error!(error = %e, "failed to persist avatar");
            self.warn("No se pudo guardar la nueva imagen de perfil.");
            return Err(e.into());
        }

        if let Some(port) = &self.port {
            port.show_avatar(&data_url);
        }
        tracing::info!("profile avatar updated");
        Ok(data_url)
    }

    /// Log out from the profile page and leave it.
    pub fn logout(&self) {
        self.auth.logout();
        if let Some(port) = &self.port {
            port.redirect_to_home();
        }
    }

    fn warn(&self, message: &str) {
        if let Some(port) = &self.port {
            port.warn(message);
        }
    }
}

/// Build the user-facing message for a DNI input.
fn dni_feedback(input: &str) -> DniFeedback {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DniFeedback {
            valid: false,
            text: "Por favor, introduce un DNI.".to_owned(),
        };
    }

    match Dni::parse(trimmed) {
        Ok(_) => DniFeedback {
            valid: true,
            text: "DNI válido.".to_owned(),
        },
        Err(DniError::InvalidFormat) => DniFeedback {
            valid: false,
            text: "Formato de DNI inválido (8 números y 1 letra).".to_owned(),
        },
        Err(DniError::WrongCheckLetter { expected }) => {
            let digits: String = trimmed.chars().take(8).collect();
            DniFeedback {
                valid: false,
                text: format!(
                    "Letra incorrecta. La letra correcta para {digits} es '{expected}'."
                ),
            }
        }
    }
}
