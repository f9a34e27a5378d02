pub mod m202603010001_create_colleges;
pub mod m202603010002_create_users;
pub mod m202603010003_create_events;
pub mod m202603010004_create_registrations;
pub mod m202603010005_create_attendance;
pub mod m202603010006_create_feedback;
pub mod m202603010007_create_notes;
