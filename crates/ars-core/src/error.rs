/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or editing character records.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The character does not carry a weapon with this name.
    #[error("{character} has no weapon named \"{weapon}\"")]
    UnknownWeapon {
        /// The character's display name.
        character: String,
        /// The weapon that was asked for.
        weapon: String,
    },

    /// A character record could not be decoded.
    #[error("invalid character record: {0}")]
    Decode(#[from] serde_json::Error),
}
