//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Atrium Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[window]
# title = "Atrium"
# width = 1280
# height = 800
# rail_width = 72        # 32-400
# user_agent = "Mozilla/5.0 ..."

# One surface per app, in rail order. Declaring any [[apps]] replaces the
# built-in list (gmail, calendar, drive, docs, chat, meet).
# [[apps]]
# name = "gmail"
# title = "Gmail"
# url = "https://mail.google.com/mail/u/0/"
# enabled = true

[navigation]
# auth_domains = ["accounts.google.com", "accounts.youtube.com"]
# extra_app_domains = ["sheets.google.com", "slides.google.com"]
# max_redirect_depth = 3  # 1-8
#
# [[navigation.redirectors]]
# host = "www.google.com"
# path = "/url"
# params = ["q", "url"]

[login_sync]
# enabled = true
# settle_delay_ms = 1500
# cooldown_ms = 5000
# auth_domains = ["accounts.google.com", "accounts.youtube.com"]
#
# [[login_sync.intermediate]]
# host = "accounts.youtube.com"
# path_prefix = "/accounts/"
# path_contains = "/acs"

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
    .to_string()
}
