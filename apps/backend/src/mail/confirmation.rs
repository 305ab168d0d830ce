//! Account confirmation email template.

pub const CONFIRMATION_SUBJECT: &str = "Confirm your ClassMate account";

/// HTML body for the confirmation email. The link carries the one-time
/// token and expires 15 minutes after registration.
pub fn build_confirmation_email(confirm_url: &str, site_name: &str, name: &str) -> String {
    format!(
        "<!DOCTYPE html>\
<html lang=\"en\">\
<head>\
<meta charset=\"UTF-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\
<title>Account Confirmation</title>\
<style>\
body {{font-family: Arial, sans-serif; background-color: #f4f4f4; color: #333; padding: 0; margin: 0;}}\
.container {{width: 100%; max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 8px; overflow: hidden;}}\
.header {{background-color: #007BFF; color: #ffffff; text-align: center; padding: 20px 0;}}\
.content {{padding: 20px;}}\
.button {{display: block; width: 200px; margin: 20px auto; padding: 10px 0; background-color: #007BFF; color: #ffffff; text-align: center; text-decoration: none; border-radius: 5px;}}\
.footer {{text-align: center; padding: 10px 0; background-color: #f4f4f4; color: #777;}}\
</style>\
</head>\
<body>\
<div class=\"container\">\
<div class=\"header\"><h1>Account Confirmation</h1></div>\
<div class=\"content\">\
<p>Hi {name},</p>\
<p>Thanks for signing up. To finish creating your account, please confirm \
your email address by clicking the button below. The link expires in 15 minutes.</p>\
<a href=\"{confirm_url}\" class=\"button\">Confirm Account</a>\
<p>If the button does not work, copy and paste this link into your browser:</p>\
<p><a href=\"{confirm_url}\">{confirm_url}</a></p>\
<p>Thanks,<br>The {site_name} team</p>\
</div>\
<div class=\"footer\"><p>&copy; {site_name}. All rights reserved.</p></div>\
</div>\
</body>\
</html>"
    )
}
