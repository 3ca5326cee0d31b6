//! Subject and body templating for code delivery mails.

/// Template for the code delivery message.
///
/// `{code}` and `{minutes}` placeholders are substituted at render time in
/// both subject and body.
#[derive(Debug, Clone)]
pub struct CodeEmailTemplate {
    pub subject: String,
    pub body: String,
}

impl Default for CodeEmailTemplate {
    fn default() -> Self {
        Self {
            subject: String::from("Your verification code"),
            body: String::from(
                "Your verification code is {code}. It expires in {minutes} minute(s).\n\n\
                 If you did not request this code, you can ignore this message.\n",
            ),
        }
    }
}

impl CodeEmailTemplate {
    /// Render subject and body for a concrete code
    pub fn render(&self, code: &str, ttl_minutes: i64) -> (String, String) {
        let substitute = |template: &str| {
            template
                .replace("{code}", code)
                .replace("{minutes}", &ttl_minutes.to_string())
        };
        (substitute(&self.subject), substitute(&self.body))
    }
}
