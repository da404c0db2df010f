mod economy_tests;
mod health_tests;
