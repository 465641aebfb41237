//! Message templates for verification and welcome emails.

use wn_core::domain::entities::{NewsletterFrequency, Subscriber};
use wn_core::services::VerificationEmail;
use wn_shared::types::Language;

use super::email_service::EmailMessage;

const BRAND: &str = "WorkNow";

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn greeting(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Hello, {}!", name),
        None => "Hello!".to_string(),
    }
}

/// Verification code email
pub fn verification_email(email: &VerificationEmail) -> EmailMessage {
    let greeting = greeting(email.first_name.as_deref());
    let minutes = email.expiration_minutes;

    let text = format!(
        "{greeting}\n\n\
         Your {BRAND} newsletter verification code is: {code}\n\n\
         The code expires in {minutes} minutes. If you did not request it, ignore this email.\n",
        greeting = greeting,
        BRAND = BRAND,
        code = email.code,
        minutes = minutes,
    );

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<body style="font-family: Arial, sans-serif; color: #1f2937;">
  <p>{greeting}</p>
  <p>Your {BRAND} newsletter verification code is:</p>
  <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px;">{code}</p>
  <p>The code expires in {minutes} minutes.</p>
  <p style="color: #6b7280; font-size: 12px;">If you did not request this code, you can ignore this email.</p>
</body>
</html>"#,
        greeting = escape_html(&greeting),
        BRAND = BRAND,
        code = escape_html(&email.code),
        minutes = minutes,
    );

    EmailMessage {
        to: email.to.clone(),
        subject: format!("{} verification code: {}", BRAND, email.code),
        html,
        text,
    }
}

/// Localized copy of the welcome email
struct WelcomeCopy {
    subject: &'static str,
    hello: &'static str,
    /// Separator between the salutation and the name
    comma: &'static str,
    subscribed: &'static str,
    daily_digest: &'static str,
    weekly_digest: &'static str,
}

fn welcome_copy(language: Language) -> WelcomeCopy {
    match language {
        Language::English => WelcomeCopy {
            subject: "Welcome to the WorkNow newsletter",
            hello: "Hello",
            comma: ", ",
            subscribed: "You are now subscribed to the WorkNow vacancy newsletter.",
            daily_digest: "You will receive a daily digest of new vacancies matching your preferences.",
            weekly_digest: "You will receive a weekly digest of new vacancies matching your preferences.",
        },
        Language::Russian => WelcomeCopy {
            subject: "Добро пожаловать в рассылку WorkNow",
            hello: "Здравствуйте",
            comma: ", ",
            subscribed: "Вы подписались на рассылку вакансий WorkNow.",
            daily_digest: "Вы будете получать ежедневную подборку новых вакансий по вашим предпочтениям.",
            weekly_digest: "Вы будете получать еженедельную подборку новых вакансий по вашим предпочтениям.",
        },
        Language::Ukrainian => WelcomeCopy {
            subject: "Ласкаво просимо до розсилки WorkNow",
            hello: "Вітаємо",
            comma: ", ",
            subscribed: "Ви підписалися на розсилку вакансій WorkNow.",
            daily_digest: "Ви отримуватимете щоденну добірку нових вакансій за вашими вподобаннями.",
            weekly_digest: "Ви отримуватимете щотижневу добірку нових вакансій за вашими вподобаннями.",
        },
        Language::Hebrew => WelcomeCopy {
            subject: "ברוכים הבאים לניוזלטר של WorkNow",
            hello: "שלום",
            comma: ", ",
            subscribed: "נרשמת בהצלחה לניוזלטר המשרות של WorkNow.",
            daily_digest: "תקבלו סיכום יומי של משרות חדשות בהתאם להעדפות שלכם.",
            weekly_digest: "תקבלו סיכום שבועי של משרות חדשות בהתאם להעדפות שלכם.",
        },
        Language::Arabic => WelcomeCopy {
            subject: "مرحبًا بك في نشرة WorkNow",
            hello: "مرحبًا",
            comma: "، ",
            subscribed: "لقد اشتركت في نشرة الوظائف من WorkNow.",
            daily_digest: "ستتلقى ملخصًا يوميًا بالوظائف الجديدة التي تناسب تفضيلاتك.",
            weekly_digest: "ستتلقى ملخصًا أسبوعيًا بالوظائف الجديدة التي تناسب تفضيلاتك.",
        },
    }
}

/// Welcome email after a subscription is confirmed, in the subscriber's language
pub fn welcome_email(subscriber: &Subscriber) -> EmailMessage {
    let copy = welcome_copy(subscriber.language);
    let greeting = match subscriber.display_name() {
        Some(name) => format!("{}{}{}!", copy.hello, copy.comma, name),
        None => format!("{}!", copy.hello),
    };
    let digest = match subscriber.preferences.frequency {
        NewsletterFrequency::Daily => copy.daily_digest,
        NewsletterFrequency::Weekly => copy.weekly_digest,
    };
    let direction = if subscriber.language.is_rtl() { "rtl" } else { "ltr" };

    let text = format!("{}\n\n{}\n{}\n", greeting, copy.subscribed, digest);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{direction}">
<body style="font-family: Arial, sans-serif; color: #1f2937;">
  <p>{greeting}</p>
  <p>{subscribed}</p>
  <p>{digest}</p>
</body>
</html>"#,
        lang = subscriber.language.code(),
        direction = direction,
        greeting = escape_html(&greeting),
        subscribed = copy.subscribed,
        digest = digest,
    );

    EmailMessage {
        to: subscriber.email.clone(),
        subject: copy.subject.to_string(),
        html,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wn_core::domain::entities::{SubscriberProfile, SubscriptionPreferences};

    #[test]
    fn test_verification_email_contains_code_and_ttl() {
        let message = verification_email(&VerificationEmail {
            to: "dana@example.com".to_string(),
            code: "042137".to_string(),
            first_name: Some("Dana".to_string()),
            expiration_minutes: 5,
        });

        assert_eq!(message.to, "dana@example.com");
        assert!(message.subject.contains("042137"));
        assert!(message.text.contains("Hello, Dana!"));
        assert!(message.text.contains("042137"));
        assert!(message.text.contains("5 minutes"));
        assert!(message.html.contains("042137"));
    }

    #[test]
    fn test_names_are_escaped_in_html() {
        let message = verification_email(&VerificationEmail {
            to: "x@example.com".to_string(),
            code: "123456".to_string(),
            first_name: Some("<b>Eve</b>".to_string()),
            expiration_minutes: 5,
        });

        assert!(message.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!message.html.contains("<b>Eve</b>"));
    }

    fn subscriber(first_name: Option<&str>, language: Language, frequency: NewsletterFrequency) -> Subscriber {
        Subscriber::new(
            "noa@example.com".to_string(),
            SubscriberProfile {
                first_name: first_name.map(str::to_string),
                last_name: None,
                language,
                preferences: SubscriptionPreferences {
                    frequency,
                    ..Default::default()
                },
            },
        )
    }

    #[test]
    fn test_welcome_email_is_written_in_subscriber_language() {
        let message = welcome_email(&subscriber(Some("Noa"), Language::Hebrew, NewsletterFrequency::Daily));

        assert_eq!(message.subject, "ברוכים הבאים לניוזלטר של WorkNow");
        assert!(message.html.contains(r#"lang="he" dir="rtl""#));
        assert!(message.text.starts_with("שלום, Noa!"));
        assert!(message.text.contains("סיכום יומי"));
        assert!(!message.text.contains("You are now subscribed"));
        assert!(!message.html.contains("Hello"));
    }

    #[test]
    fn test_welcome_email_english_weekly_without_name() {
        let message = welcome_email(&subscriber(None, Language::English, NewsletterFrequency::Weekly));

        assert!(message.html.contains(r#"dir="ltr""#));
        assert!(message.text.starts_with("Hello!"));
        assert!(message.text.contains("weekly digest"));
    }

    #[test]
    fn test_every_language_has_distinct_welcome_copy() {
        let languages = [
            Language::English,
            Language::Russian,
            Language::Ukrainian,
            Language::Hebrew,
            Language::Arabic,
        ];
        let bodies: std::collections::HashSet<String> = languages
            .iter()
            .map(|&language| welcome_email(&subscriber(None, language, NewsletterFrequency::Weekly)).text)
            .collect();
        assert_eq!(bodies.len(), languages.len());
    }
}
