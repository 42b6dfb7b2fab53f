pub mod extract_address;
pub mod extract_council_reference;
pub mod extract_date_received;
pub mod extract_description;
pub mod extract_on_notice_to;
pub mod extract_rows;
pub mod extractor;
pub mod permit_record;
