pub struct Icons;

impl Icons {
    pub const CLINIC: &str = "🏥";
    pub const PILL: &str = "💊";
    pub const TOOLS: &str = "🧰";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DEL: &str = "🗑️";
}
