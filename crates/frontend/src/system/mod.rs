pub mod live_socket;
