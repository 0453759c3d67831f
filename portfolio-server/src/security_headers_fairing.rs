//! Fixed security headers on every response, catchers included.

use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Request, Response};

use crate::policy::{DeliveryPolicy, FrameOptions};
use crate::static_files::Previewable;

pub struct SecurityHeaders;

#[rocket::async_trait]
impl Fairing for SecurityHeaders {
    fn info(&self) -> Info {
        Info {
            name: "Security Headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, req: &'r Request<'_>, res: &mut Response<'r>) {
        let previewable = Previewable::of(req);
        let frame_options = req
            .rocket()
            .state::<DeliveryPolicy>()
            .map_or(FrameOptions::Deny, |policy| policy.frame_options(previewable));

        res.set_raw_header("X-Content-Type-Options", "nosniff");
        res.set_raw_header("X-Frame-Options", frame_options.as_str());
        res.set_raw_header("X-XSS-Protection", "1; mode=block");
    }
}
