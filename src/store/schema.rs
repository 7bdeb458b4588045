pub const SCHEMA: &str = r#"
-- Profiles are the people behind the tokens; role is assigned by an administrator
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL DEFAULT '',
    role TEXT,                      -- NULL = not assigned yet
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now'))
);

-- Tokens are auth credentials; non-admin tokens must belong to a profile
CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    token_hash TEXT NOT NULL,          -- argon2id hash with embedded salt
    token_lookup TEXT NOT NULL,        -- first 8 chars of a UUID for fast lookup
    is_admin INTEGER NOT NULL DEFAULT 0,
    profile_id TEXT REFERENCES profiles(id) ON DELETE CASCADE,
    created_at TEXT DEFAULT (datetime('now')),
    expires_at TEXT,            -- NULL = never
    last_used_at TEXT
);

-- Monetary columns are TEXT: values may arrive as entered and are coerced on read.
CREATE TABLE IF NOT EXISTS accounting_reports (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    report_date TEXT NOT NULL,
    total_sales TEXT NOT NULL,
    cash_deposit TEXT NOT NULL,
    expenses TEXT NOT NULL,
    notes TEXT,
    accounting_manager_viewed_at TEXT,
    senior_manager_viewed_at TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    UNIQUE(user_id, report_date)
);

CREATE TABLE IF NOT EXISTS cashier_reports (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    report_date TEXT NOT NULL,
    total_sales TEXT NOT NULL,
    cash_amount TEXT NOT NULL,
    non_cash_amount TEXT NOT NULL,
    incentive_amount TEXT,
    notes TEXT,
    accounting_manager_viewed_at TEXT,
    senior_manager_viewed_at TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    UNIQUE(user_id, report_date)
);

CREATE TABLE IF NOT EXISTS consignment_staff_reports (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    report_date TEXT NOT NULL,
    total_sales TEXT NOT NULL,
    items_received INTEGER NOT NULL DEFAULT 0,
    items_returned INTEGER NOT NULL DEFAULT 0,
    notes TEXT,
    accounting_manager_viewed_at TEXT,
    senior_manager_viewed_at TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    UNIQUE(user_id, report_date)
);

CREATE TABLE IF NOT EXISTS supervisor_manager_reports (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    report_date TEXT NOT NULL,
    summary TEXT NOT NULL,
    issues TEXT,
    follow_up TEXT,
    accounting_manager_viewed_at TEXT,
    senior_manager_viewed_at TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    UNIQUE(user_id, report_date)
);

-- Branch count lines of a consignment staff report
CREATE TABLE IF NOT EXISTS lpk_entries (
    id TEXT PRIMARY KEY,
    report_id TEXT NOT NULL REFERENCES consignment_staff_reports(id) ON DELETE CASCADE,
    branch TEXT NOT NULL,
    count INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS notifications (
    id TEXT PRIMARY KEY,
    recipient_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    sender_id TEXT REFERENCES profiles(id) ON DELETE SET NULL,
    kind TEXT NOT NULL,             -- 'submission' | 'view'
    message TEXT NOT NULL,
    report_id TEXT,
    report_kind TEXT,
    is_read INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS activity_logs (
    id TEXT PRIMARY KEY,
    profile_id TEXT NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    action TEXT NOT NULL,
    details TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_tokens_lookup ON tokens(token_lookup);
CREATE INDEX IF NOT EXISTS idx_tokens_profile ON tokens(profile_id);
CREATE INDEX IF NOT EXISTS idx_profiles_role ON profiles(role);
CREATE INDEX IF NOT EXISTS idx_accounting_reports_date ON accounting_reports(report_date);
CREATE INDEX IF NOT EXISTS idx_cashier_reports_date ON cashier_reports(report_date);
CREATE INDEX IF NOT EXISTS idx_consignment_staff_reports_date ON consignment_staff_reports(report_date);
CREATE INDEX IF NOT EXISTS idx_supervisor_manager_reports_date ON supervisor_manager_reports(report_date);
CREATE INDEX IF NOT EXISTS idx_lpk_entries_report ON lpk_entries(report_id);
CREATE INDEX IF NOT EXISTS idx_notifications_recipient ON notifications(recipient_id, is_read);
CREATE INDEX IF NOT EXISTS idx_activity_logs_profile ON activity_logs(profile_id);
"#;
