/// Available timestamp store backends, selected by `storage.timestamp_backend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimestampBackend {
    /// Small JSON document in the data directory.
    #[default]
    File,
    /// Namespaced key in the OS-level settings file.
    Settings,
}

impl TimestampBackend {
    /// Parse a backend name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Settings => "settings",
        }
    }

    pub fn all() -> &'static [TimestampBackend] {
        &[Self::File, Self::Settings]
    }
}

impl std::fmt::Display for TimestampBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
