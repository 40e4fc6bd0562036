//! Resource file types
//!
//! Archives key resources by content hash; when a dictionary entry maps a
//! hash back to a file name, the type is inferred from its extension.

/// The type of a resource inside an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FileType {
    /// Generic resource / unresolved.
    #[default]
    Unknown,
    /// 2DA two-dimensional array table.
    Twoda,
    /// TLK talk table.
    Tlk,
    /// GFF generic structured data.
    Gff,
    /// NSS script source.
    Nss,
    /// NCS compiled script.
    Ncs,
    /// Hashed resource archive.
    Herf,
    /// Archive name dictionary.
    Dict,
    /// TGA image.
    Tga,
    /// WAV audio.
    Wav,
    /// Nintendo DS texture.
    Nsbtx,
    /// Nintendo DS model.
    Nsbmd,
    /// Nintendo DS model animation.
    Nsbca,
    /// SMP sound sample bank.
    Smp,
}

impl FileType {
    /// Infer the type from a resource name's extension.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return FileType::Unknown;
        };

        match ext.to_ascii_lowercase().as_str() {
            "2da" => FileType::Twoda,
            "tlk" => FileType::Tlk,
            "gff" => FileType::Gff,
            "nss" => FileType::Nss,
            "ncs" => FileType::Ncs,
            "herf" => FileType::Herf,
            "dict" => FileType::Dict,
            "tga" => FileType::Tga,
            "wav" => FileType::Wav,
            "nsbtx" => FileType::Nsbtx,
            "nsbmd" => FileType::Nsbmd,
            "nsbca" => FileType::Nsbca,
            "smp" => FileType::Smp,
            _ => FileType::Unknown,
        }
    }

    /// The canonical extension for this type, if it has one.
    #[must_use]
    pub fn extension(self) -> Option<&'static str> {
        match self {
            FileType::Unknown => None,
            FileType::Twoda => Some("2da"),
            FileType::Tlk => Some("tlk"),
            FileType::Gff => Some("gff"),
            FileType::Nss => Some("nss"),
            FileType::Ncs => Some("ncs"),
            FileType::Herf => Some("herf"),
            FileType::Dict => Some("dict"),
            FileType::Tga => Some("tga"),
            FileType::Wav => Some("wav"),
            FileType::Nsbtx => Some("nsbtx"),
            FileType::Nsbmd => Some("nsbmd"),
            FileType::Nsbca => Some("nsbca"),
            FileType::Smp => Some("smp"),
        }
    }
}

/// The file name without its extension.
#[must_use]
pub fn stem(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}
