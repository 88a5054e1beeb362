use axum::response::Html;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>App Ads &amp; Policies Service</title>
    <style>
        body { font-family: sans-serif; max-width: 640px; margin: 40px auto; padding: 0 20px; color: #333; }
        li { margin: 12px 0; }
        small { color: #666; }
    </style>
</head>
<body>
    <h1>App Ads &amp; Policies Service</h1>
    <h2>Available Routes</h2>
    <ul>
        <li><a href="/app-ads.txt">/app-ads.txt</a><br><small>Returns app-ads.txt content fetched from the configured URL</small></li>
        <li><a href="/policies">/policies</a><br><small>Returns privacy policy content fetched from the configured URL</small></li>
    </ul>
    <p><small>Data is fetched from URLs configured in environment variables and cached for 1 hour.</small></p>
</body>
</html>"#;

pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
