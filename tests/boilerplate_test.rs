use rs_distiller::extract;

#[test]
fn nav_is_excluded_even_inside_article() {
    let html = r#"
        <html>
          <body>
            <article>
              <nav>MENU_TEXT</nav>
              <p>BODY_TEXT</p>
            </article>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            assert!(result.body.contains("BODY_TEXT"));
            assert!(!result.body.contains("MENU_TEXT"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn site_footer_is_excluded_but_article_footer_is_preserved() {
    let html = r#"
        <html>
          <body>
            <footer>SITE_FOOTER_TEXT</footer>
            <article>
              <p>ARTICLE_BODY</p>
              <footer>ARTICLE_FOOTER_TEXT</footer>
            </article>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            assert!(result.body.contains("ARTICLE_BODY"));
            assert!(result.body.contains("ARTICLE_FOOTER_TEXT"));
            assert!(!result.body.contains("SITE_FOOTER_TEXT"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn advertisement_containers_are_removed() {
    let html = r#"
        <html>
          <body>
            <div class="ad">Buy the best shoes in town at half the usual price today.</div>
            <article>
              <p>The city council approved the new transit plan after a long debate.</p>
            </article>
            <div id="sponsored">Our partners recommend these fine products for your home.</div>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            assert_eq!(
                result.body,
                "The city council approved the new transit plan after a long debate."
            );
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn link_heavy_lists_are_removed() {
    let html = r#"
        <html>
          <body>
            <main>
              <p>Researchers published a detailed study of river pollution this spring.</p>
              <ul>
                <li><a href="/a">Sports</a></li>
                <li><a href="/b">Weather</a></li>
                <li><a href="/c">Opinion</a></li>
                <li><a href="/d">Travel</a></li>
              </ul>
            </main>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            assert!(result.body.contains("river pollution"));
            assert!(!result.body.contains("Sports"));
            assert!(!result.body.contains("Travel"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn scripts_and_styles_never_reach_the_body() {
    let html = r#"
        <html>
          <head><style>p { color: red; }</style></head>
          <body>
            <script>var tracking = "SCRIPT_TEXT";</script>
            <article><p>The festival drew thousands of visitors to the old harbor.</p></article>
            <noscript>NOSCRIPT_TEXT</noscript>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            assert!(!result.body.contains("SCRIPT_TEXT"));
            assert!(!result.body.contains("NOSCRIPT_TEXT"));
            assert!(!result.body.contains("color"));
            assert!(result.body.contains("old harbor"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn content_order_is_preserved() {
    let html = r#"
        <html>
          <body>
            <article>
              <p>First, the committee gathered in the morning to review evidence.</p>
              <p>Second, the witnesses were heard one at a time in the afternoon.</p>
              <p>Third, the chair closed the session shortly before the evening news.</p>
            </article>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            let lines: Vec<&str> = result.body.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with("First"));
            assert!(lines[1].starts_with("Second"));
            assert!(lines[2].starts_with("Third"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn sidebar_without_article_marker_is_dropped() {
    let html = r#"
        <html>
          <body>
            <div id="content">
              <p>The museum reopened its east wing after two years of careful repairs.</p>
            </div>
            <div class="sidebar">
              <p>Popular this week: ten recipes you will want to cook again and again.</p>
            </div>
          </body>
        </html>
    "#;

    match extract(html) {
        Ok(result) => {
            assert!(result.body.contains("east wing"));
            assert!(!result.body.contains("recipes"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}
