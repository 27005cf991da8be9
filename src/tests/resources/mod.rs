mod link_tests;
mod node_tests;
