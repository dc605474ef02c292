//! HTML rendering for the index page.

use crate::models::{product::Product, signed_url::SignedUrl};

/// Render the product list with the banner link.
///
/// Every product becomes exactly one `<li class="product">` entry tagged
/// with its id. All interpolated values are escaped, including the signed
/// URL whose query separators become `&amp;` inside the attribute.
pub fn render(products: &[Product], banner: &SignedUrl) -> String {
    let mut html = String::from(concat!(
        "<!DOCTYPE html>",
        r#"<html lang="en"><head><meta charset="utf-8">"#,
        "<title>Products</title>",
        r#"<link rel="stylesheet" href="/static/styles.css">"#,
        "</head><body>",
    ));

    html.push_str(&format!(
        r#"<header><img class="banner" src="{}" alt="{}"></header>"#,
        html_escape(&banner.url),
        html_escape(&banner.key)
    ));
    html.push_str(&format!(
        r#"<p class="banner-note">Banner link issued {} and valid for {} minutes (until {}).</p>"#,
        banner.issued_at.format("%Y-%m-%d %H:%M:%S UTC"),
        banner.expires_in.as_secs() / 60,
        banner.expires_at.format("%H:%M:%S UTC")
    ));

    html.push_str("<main><h1>Products</h1>");
    if products.is_empty() {
        html.push_str(r#"<p class="empty">No products available.</p>"#);
    }

    html.push_str(r#"<ul class="products">"#);
    for product in products {
        html.push_str(&format!(r#"<li class="product" data-id="{}">"#, product.id));
        html.push_str(&format!("<h2>{}</h2>", html_escape(&product.name)));
        html.push_str(&format!(
            r#"<p class="description">{}</p>"#,
            html_escape(product.description.as_deref().unwrap_or(""))
        ));
        html.push_str(&format!(
            r#"<p class="price">${}</p>"#,
            product.display_price()
        ));
        html.push_str("</li>");
    }
    html.push_str("</ul></main></body></html>");
    html
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn banner() -> SignedUrl {
        let issued_at = Utc::now();
        SignedUrl {
            url: "https://bucket.example/banner.jpg?X-Amz-Expires=3600&X-Amz-Signature=abc".into(),
            key: "banner.jpg".into(),
            issued_at,
            expires_in: Duration::from_secs(3600),
            expires_at: issued_at + TimeDelta::hours(1),
        }
    }

    fn product(id: i32, name: &str, description: Option<&str>, price: Decimal) -> Product {
        Product {
            id,
            name: name.into(),
            description: description.map(Into::into),
            price,
        }
    }

    #[test]
    fn one_entry_per_product() {
        let products = vec![
            product(1, "Desk", Some("Oak, 120cm"), Decimal::new(24900, 2)),
            product(2, "Chair", None, Decimal::new(89, 0)),
            product(3, "Lamp", Some("Warm light"), Decimal::new(195, 1)),
        ];

        let html = render(&products, &banner());

        assert_eq!(html.matches(r#"<li class="product""#).count(), 3);
        assert!(html.contains(r#"<li class="product" data-id="2">"#));
        assert!(html.contains("<h2>Desk</h2>"));
        assert!(html.contains(r#"<p class="description">Oak, 120cm</p>"#));
        assert!(html.contains(r#"<p class="price">$249.00</p>"#));
        assert!(html.contains(r#"<p class="price">$89.00</p>"#));
        assert!(html.contains(r#"<p class="price">$19.50</p>"#));
        assert!(!html.contains("No products available."));
        assert!(html.contains("valid for 60 minutes"));
    }

    #[test]
    fn empty_catalog_renders_no_entries() {
        let html = render(&[], &banner());

        assert_eq!(html.matches(r#"<li class="product""#).count(), 0);
        assert!(html.contains("No products available."));
    }

    #[test]
    fn values_are_escaped() {
        let products = vec![product(
            1,
            "<script>alert(1)</script>",
            Some("Tom & \"Jerry\""),
            Decimal::ONE,
        )];

        let html = render(&products, &banner());

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; &quot;Jerry&quot;"));
        assert!(html.contains("X-Amz-Expires=3600&amp;X-Amz-Signature=abc"));
    }
}
