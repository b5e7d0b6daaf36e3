use regex::Regex;

/// Redacts session material from the input string.
///
/// Replaces OAuth access tokens, bearer tokens, session cookies and
/// credential-bearing query parameters with `[REDACTED]`.
pub fn sanitize_secrets(input: &str) -> String {
    // Whole-match patterns first, then `name=value` patterns that keep the name.
    let whole: &[&str] = &[
        r"ya29\.[a-zA-Z0-9._\-]+",
        r"Bearer [a-zA-Z0-9._\-]+",
    ];
    let keyed: &[&str] = &[
        r"\b((?:__Secure-[0-9A-Z]+PSID|SID|HSID|SSID|APISID|SAPISID|OSID)=)[^;\s&]+",
        r"(?i)\b((?:access_token|id_token|refresh_token|code|token|password)=)[^;\s&]+",
    ];

    let mut result = input.to_string();

    for pattern in whole {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        result = re.replace_all(&result, "[REDACTED]").into_owned();
    }
    for pattern in keyed {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        result = re.replace_all(&result, "${1}[REDACTED]").into_owned();
    }

    result
}
