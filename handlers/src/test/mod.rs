mod message_service_test;
mod query_service_test;
mod support;
