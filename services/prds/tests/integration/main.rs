mod helpers;
mod orchestrator_test;
mod prd_repository_test;
mod user_repository_test;
