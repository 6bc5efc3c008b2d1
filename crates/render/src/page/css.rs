//! Styles for skeleton loaders and the page banner.
//!
//! Bootstrap supplies everything else.

pub const STYLES: &str = r#"
        body { background: #f5f6f8; }
        .card { border: 0; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08); }

        .skeleton {
            background: linear-gradient(90deg, #eceff1 25%, #f5f6f8 37%, #eceff1 63%);
            background-size: 400% 100%;
            animation: skeleton-pulse 1.4s ease infinite;
            border-radius: 0.375rem;
        }
        .skeleton-card {
            background: linear-gradient(90deg, #eceff1 25%, #f5f6f8 37%, #eceff1 63%);
            background-size: 400% 100%;
            animation: skeleton-pulse 1.4s ease infinite;
            border-radius: 0.5rem;
        }
        .skeleton-text { height: 0.8rem; width: 60%; }
        .skeleton-heading { height: 1.6rem; }
        .skeleton-table-row { display: flex; gap: 1rem; padding: 0.75rem; margin-bottom: 0.5rem; }
        .skeleton-table-cell { flex: 1; height: 1rem; background: rgba(255, 255, 255, 0.5); border-radius: 0.25rem; }

        @keyframes skeleton-pulse {
            0% { background-position: 100% 50%; }
            100% { background-position: 0 50%; }
        }

        .banner-area {
            position: fixed;
            top: 1rem;
            right: 1rem;
            z-index: 1080;
            max-width: 28rem;
        }
        .error-message { transition: opacity 0.3s ease; }
        .error-message.fade-out { opacity: 0; }
"#;
