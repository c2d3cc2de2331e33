pub mod mailgun;
