//! Built-in extension tables.
//!
//! Entries are lowercase and dot-prefixed. The deny list keeps the repeated
//! entries it has always had; sets built from it collapse them.

/// Executable and otherwise dangerous file types. Checked before anything else.
pub const BLOCKED_EXTENSIONS: &[&str] = &[
    // Windows executables
    ".exe", ".bat", ".cmd", ".com", ".msi", ".scr", ".vbs", ".ps1",
    ".dll", ".sys", ".drv", ".pif", ".application", ".gadget", ".msp",
    ".cpl", ".inf", ".ins", ".isp", ".job", ".jse", ".lnk", ".msc",
    ".msh", ".msh1", ".msh2", ".mshxml", ".msh1xml", ".msh2xml",
    ".ps1xml", ".ps2", ".ps2xml", ".psc1", ".psc2", ".reg", ".rgs",
    ".sct", ".shb", ".shs", ".u3p", ".vbe", ".vbscript", ".ws", ".wsf",
    ".wsh",
    // Unix/Linux executables
    ".sh", ".bash", ".zsh", ".fish", ".csh", ".tcsh", ".ksh",
    ".run", ".bin", ".command",
    // Java/Android
    ".jar", ".class", ".apk", ".dex",
    // macOS
    ".dmg", ".pkg", ".app",
    // Linux packages
    ".deb", ".rpm", ".snap",
    // Script files with execution risk
    ".vb", ".vbe", ".wsc", ".wsf", ".wsh",
    // Other dangerous
    ".hta", ".cpl", ".msc", ".jar",
];

pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".epub", ".mobi", ".azw", ".azw3",
    ".doc", ".docx", ".odt", ".rtf", ".txt",
    ".xls", ".xlsx", ".ods", ".csv",
    ".ppt", ".pptx", ".odp",
];

pub const VIDEO_EXTENSIONS: &[&str] = &[
    ".mp4", ".avi", ".mov", ".wmv", ".flv", ".mkv", ".webm",
    ".m4v", ".mpg", ".mpeg", ".3gp", ".ogv",
];

pub const AUDIO_EXTENSIONS: &[&str] = &[
    ".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma",
    ".opus", ".ape", ".alac",
];

pub const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp", ".svg",
    ".ico", ".tiff", ".tif", ".heic", ".heif",
];

/// Archive contents are never inspected.
pub const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz"];

pub const DESIGN_EXTENSIONS: &[&str] = &[
    ".psd", ".ai", ".sketch", ".fig", ".xd", ".afdesign",
    ".blend", ".fbx", ".obj", ".stl", ".3ds", ".dae",
    ".indd", ".eps", ".cdr",
];

/// Source files only, never compiled executables.
pub const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".jsx", ".tsx", ".html", ".css", ".scss",
    ".json", ".xml", ".yaml", ".yml", ".md", ".markdown",
    ".c", ".cpp", ".h", ".hpp", ".java", ".go", ".rs", ".php",
    ".rb", ".swift", ".kt", ".dart", ".lua", ".r", ".sql",
];

pub const FONT_EXTENSIONS: &[&str] = &[".ttf", ".otf", ".woff", ".woff2", ".eot"];

pub const MISC_EXTENSIONS: &[&str] = &[".ics", ".vcf", ".kml", ".gpx", ".kmz"];

/// Every group that makes up the allow list.
pub const ALLOWED_GROUPS: &[&[&str]] = &[
    DOCUMENT_EXTENSIONS,
    VIDEO_EXTENSIONS,
    AUDIO_EXTENSIONS,
    IMAGE_EXTENSIONS,
    ARCHIVE_EXTENSIONS,
    DESIGN_EXTENSIONS,
    CODE_EXTENSIONS,
    FONT_EXTENSIONS,
    MISC_EXTENSIONS,
];

/// Iterates the built-in allow list (group order, no duplicates).
pub fn allowed_extensions() -> impl Iterator<Item = &'static str> {
    ALLOWED_GROUPS.iter().flat_map(|group| group.iter().copied())
}
